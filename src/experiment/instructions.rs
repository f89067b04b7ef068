//! Participant-facing instruction screens

use super::condition::Color;
use super::keymap::ReactionKeys;

fn key_lines(keys: &ReactionKeys) -> String {
    let last = Color::ALL.len() - 1;
    Color::ALL
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            format!(
                "如果emoji的颜色是{}，请按键盘上的{}键{}",
                color.word(),
                keys.key_for(color).to_ascii_uppercase(),
                if i == last { "。" } else { "；" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn general(keys: &ReactionKeys) -> String {
    format!(
        "你会先看到一个十字注视点，请注视十字。\n\
         很短的时间后之后十字的位置会出现一个有颜色的emoji。\n\
         你的任务是判断emoji的颜色。\n\
         {}\n\
         请在看到emoji后尽快做出反应。\n\
         如果你准备好了，请按空格键继续。",
        key_lines(keys)
    )
}

pub fn practice(keys: &ReactionKeys, threshold: f64) -> String {
    format!(
        "现在我们来练习一下。\n\
         请通过练习来熟悉实验流程和按键。\n\
         记住，\n\
         {}\n\
         如果练习中你的按键反应正确率高于{:.0}%，\n\
         我们会继续进行正式实验，否则你将需要再次进行练习。\n\
         请在看到emoji后尽快做出反应。\n\
         如果你准备好了，请按空格键继续。",
        key_lines(keys),
        threshold * 100.0
    )
}

pub const EXPERIMENT: &str = "练习结束了，接下来我们开始正式实验。\n\
正式实验中反应错误的试次会被记录下来，\n\
我们会在实验结束后让你重新做这些试次。\n\
请在看到emoji后尽快做出反应。\n\
如果你准备好了，请按空格键继续。";

pub const REMEDIAL: &str = "接下来开始补救实验。\n\
请在看到emoji后尽快做出反应。\n\
如果你准备好了，请按空格键继续。";

pub const END: &str = "实验结束了，谢谢你的参与！\n\
请通知主试。\n\
按任意键退出实验程序。";

pub const CORRECT_FEEDBACK: &str = "反应正确！";
pub const WRONG_FEEDBACK: &str = "反应错误！";
