use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, get_all_questions, search_questions},
        },
        Category, NewQuestion, Question,
    },
    server::{
        app::{AppState, PageSize},
        errors::{ApiError, ApiResponse},
        extract::{AppJson, AppPath, AppQuery},
        pagination::{paginate, PageQuery},
    },
};

/// Body of `POST /questions`: a search when `searchTerm` is present, a new
/// question otherwise.
#[derive(Deserialize)]
struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<Category>>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuestionsPostResponse {
    Search(QuestionsPage),
    Created(Success),
}

#[derive(Serialize)]
struct Success {
    success: bool,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    State(PageSize(per_page)): State<PageSize>,
    AppQuery(PageQuery { page }): AppQuery<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let questions = get_all_questions(&pool).await?;
    let current = paginate(&questions, page, per_page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        categories: Some(get_all_categories(&pool).await?),
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<Success> {
    if !questions::delete_question(&pool, id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(Json(Success { success: true }))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    State(PageSize(per_page)): State<PageSize>,
    AppQuery(PageQuery { page }): AppQuery<PageQuery>,
    AppJson(body): AppJson<QuestionsBody>,
) -> ApiResponse<QuestionsPostResponse> {
    if let Some(term) = body.search_term {
        let found = search_questions(&pool, &term)
            .await
            .map_err(ApiError::unprocessable)?;
        return Ok(Json(QuestionsPostResponse::Search(QuestionsPage {
            success: true,
            questions: paginate(&found, page, per_page).to_vec(),
            total_questions: found.len(),
            categories: None,
            current_category: None,
        })));
    }

    let (Some(question), Some(answer), Some(category), Some(difficulty)) = (
        body.question,
        body.answer,
        body.category,
        body.difficulty,
    ) else {
        return Err(ApiError::BadRequest);
    };
    let id = questions::create_question(
        &pool,
        NewQuestion {
            question: &question,
            answer: &answer,
            category,
            difficulty,
        },
    )
    .await
    .map_err(ApiError::unprocessable)?;
    tracing::info!("Created question {id}");
    Ok(Json(QuestionsPostResponse::Created(Success { success: true })))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
