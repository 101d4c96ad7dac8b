use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category, questions::random_question},
        Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_category_id,
        errors::{ApiError, ApiResponse},
        extract::AppJson,
    },
    telemetry::QUIZ_DRAW_CNTR,
};

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(deserialize_with = "deserialize_category_id")]
    quiz_category: i64,
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Question,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> ApiResponse<QuizQuestion> {
    let category = request.quiz_category;
    if get_category(&pool, category)
        .await
        .map_err(ApiError::unprocessable)?
        .is_none()
    {
        return Err(ApiError::NotFound);
    }

    let drawn = random_question(&pool, category, &request.previous_questions)
        .await
        .map_err(ApiError::unprocessable)?;
    let category_label = category.to_string();
    match drawn {
        Some(question) => {
            QUIZ_DRAW_CNTR
                .with_label_values(&[category_label.as_str(), "drawn"])
                .inc();
            Ok(Json(QuizQuestion {
                success: true,
                question,
            }))
        }
        // every question of the category was already asked
        None => {
            QUIZ_DRAW_CNTR
                .with_label_values(&[category_label.as_str(), "exhausted"])
                .inc();
            tracing::debug!("No questions left in category {category}");
            Err(ApiError::Unprocessable)
        }
    }
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
