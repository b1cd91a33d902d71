//! Board page handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use crate::board::{keys, Board, BoardDetail};
use crate::template::{TemplateContext, BOARDS_PAGE, BOARD_PAGE};
use crate::web::dto::{boards_value, board_value, comments_value, AddCommentForm, CreateBoardForm};
use crate::web::error::PageError;
use crate::web::handlers::AppState;
use crate::CorkboardError;

/// GET / - Board list with the creation form.
pub async fn list_boards(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let boards = state.service.list_boards().await?;
    let html = render_boards_page(&state, &boards, &CreateBoardForm::default(), None)?;
    Ok(Html(html))
}

/// POST / - Create a board, then redirect to it.
///
/// Invalid input re-renders the list page with the message and the
/// submitted values.
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateBoardForm>,
) -> Result<Response, PageError> {
    match state
        .service
        .create_board(&form.creator, &form.board_name)
        .await
    {
        Ok(board_id) => Ok(Redirect::to(&format!("/{board_id}")).into_response()),
        Err(CorkboardError::Validation(message)) => {
            tracing::debug!("Rejected board form: {}", message);
            let boards = state.service.list_boards().await?;
            let html = render_boards_page(&state, &boards, &form, Some(&message))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /:board_id - Board with its comments and the comment form.
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let board_id = parse_board_id(&board_id)?;
    let detail = state.service.get_board(board_id).await?;
    let html = render_board_page(&state, &detail, &AddCommentForm::default(), None)?;
    Ok(Html(html))
}

/// POST /:board_id - Add a comment, then redirect back to the board.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<String>,
    Form(form): Form<AddCommentForm>,
) -> Result<Response, PageError> {
    let board_id = parse_board_id(&board_id)?;

    match state
        .service
        .add_comment(board_id, &form.creator, &form.comment)
        .await
    {
        Ok(_) => Ok(Redirect::to(&format!("/{board_id}")).into_response()),
        Err(CorkboardError::Validation(message)) => {
            tracing::debug!("Rejected comment form for board {}: {}", board_id, message);
            let detail = state.service.get_board(board_id).await?;
            let html = render_board_page(&state, &detail, &form, Some(&message))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Board ids in URLs must be positive decimal integers.
fn parse_board_id(raw: &str) -> Result<i64, PageError> {
    keys::parse_id(raw).ok_or_else(|| PageError::not_found("The board does not exist."))
}

fn render_boards_page(
    state: &AppState,
    boards: &[Board],
    form: &CreateBoardForm,
    error: Option<&str>,
) -> Result<String, PageError> {
    let mut context = TemplateContext::new();
    context.set("boards", boards_value(boards, &state.timezone));
    context.set("creator", form.creator.as_str());
    context.set("board_name", form.board_name.as_str());
    context.set("error", error);

    state
        .templates
        .render(BOARDS_PAGE, &context)
        .map_err(|e| CorkboardError::from(e).into())
}

fn render_board_page(
    state: &AppState,
    detail: &BoardDetail,
    form: &AddCommentForm,
    error: Option<&str>,
) -> Result<String, PageError> {
    let mut context = TemplateContext::new();
    context.set("board", board_value(&detail.board, &state.timezone));
    context.set("comments", comments_value(&detail.comments, &state.timezone));
    context.set("creator", form.creator.as_str());
    context.set("comment", form.comment.as_str());
    context.set("error", error);

    state
        .templates
        .render(BOARD_PAGE, &context)
        .map_err(|e| CorkboardError::from(e).into())
}
