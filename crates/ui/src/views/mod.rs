mod admin;
mod notices;
mod quiz;
mod ranking;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use notices::NoticeHost;
pub use quiz::QuizView;
pub use ranking::{RankingPanel, RankingView};
pub use state::{ViewError, ViewState, view_state_from_resource};
