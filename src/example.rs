//! Built-in example payload

use crate::request::MatchRequest;

pub const EXAMPLE_JOB_DESCRIPTION: &str = "Требуется Product Manager с опытом в B2B, управлением командами и знанием ИИ. Необходим английский язык уровня B2+.";

pub const EXAMPLE_RESUME: &str = "Работал менеджером продуктов, запускал SaaS, координировал разработчиков. Нет опыта в ИИ, но быстро обучаюсь.";

/// Job text and resume filled in, URL left empty
pub fn example_request() -> MatchRequest {
    MatchRequest::new(EXAMPLE_JOB_DESCRIPTION, "", EXAMPLE_RESUME)
}
