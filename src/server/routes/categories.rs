use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Category, Question,
    },
    server::{
        app::{AppState, PageSize},
        errors::{ApiError, ApiResponse},
        extract::{AppPath, AppQuery},
        pagination::{paginate, PageQuery},
    },
};

#[derive(Serialize)]
struct CategoriesPage {
    success: bool,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryQuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesPage> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesPage {
        success: true,
        categories,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    State(PageSize(per_page)): State<PageSize>,
    AppPath(category_id): AppPath<i64>,
    AppQuery(PageQuery { page }): AppQuery<PageQuery>,
) -> ApiResponse<CategoryQuestionsPage> {
    if get_category(&pool, category_id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let questions = get_questions_for_category(&pool, category_id).await?;
    // an empty page of an existing category is still a valid answer
    Ok(Json(CategoryQuestionsPage {
        success: true,
        questions: paginate(&questions, page, per_page).to_vec(),
        total_questions: questions.len(),
        current_category: category_id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{category_id}/questions",
            get(questions_for_category),
        )
        .with_state(state)
}
