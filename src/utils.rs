use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ureq::{Agent, AgentBuilder};

pub const USER_AGENT: &str = concat!("storemap/", env!("CARGO_PKG_VERSION"));

pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {msg} {pos}/{len} {percent}% ({eta})")
        .expect("hardcoded")
}

pub fn progress_bar(len: u64, msg: &str, hidden: bool) -> ProgressBar {
    let target = if hidden {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stderr()
    };
    ProgressBar::with_draw_target(Some(len), target)
        .with_style(progress_style())
        .with_message(msg.to_string())
}

pub fn agent(timeout: Duration) -> Agent {
    AgentBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
