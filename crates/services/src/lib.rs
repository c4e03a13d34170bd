#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod notice;
pub mod question_service;
pub mod quiz_loop;
pub mod ranking;

pub use quiz_core::Clock;
pub use storage::changes::{ChangeFeed, TableChange};

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionServiceError, QuizError, RankingError};
pub use notice::{ChannelSink, Notice, NoticeLevel, NoticeSink, NullSink, RecordingSink};
pub use question_service::QuestionService;
pub use quiz_loop::{QuizLoopService, REVEAL_DELAY_MS};
pub use ranking::{is_current_player, RankingService};
