//! Request handlers for each route.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Form;
use tracing::{debug, info};

use crate::error::Result;

use super::flash::{self, Flash};
use super::forms::{ContactForm, ProjectForm};
use super::pages::{self, Nav};
use super::AppState;

/// A body that is not a urlencoded form is treated as a form with every field missing.
fn form_or_default<T: Default>(form: std::result::Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!("Treating unreadable form body as empty: {}", rejection);
            T::default()
        }
    }
}

pub(crate) async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.render(&headers, Nav::Home, "Home", &pages::index(&state.site))
}

pub(crate) async fn about(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.render(&headers, Nav::About, "About", &pages::about(&state.site))
}

pub(crate) async fn resume(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.render(&headers, Nav::Resume, "Resume", &pages::resume(&state.site))
}

pub(crate) async fn projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response> {
    let projects = state.repo.list_projects().await?;
    debug!("Rendering {} projects", projects.len());
    Ok(state.render(
        &headers,
        Nav::Projects,
        "Projects",
        &pages::projects(&projects),
    ))
}

pub(crate) async fn add_project_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    state.render(
        &headers,
        Nav::Projects,
        "Add Project",
        &pages::add_project(&ProjectForm::default()),
    )
}

pub(crate) async fn add_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: std::result::Result<Form<ProjectForm>, FormRejection>,
) -> Result<Response> {
    let form = form_or_default(form);
    match form.validate() {
        Err(errors) => {
            debug!("Add-project form rejected with {} errors", errors.len());
            let errors: Vec<Flash> = errors.into_iter().map(Flash::error).collect();
            Ok(state.render_with(
                &headers,
                Nav::Projects,
                "Add Project",
                &pages::add_project(&form),
                errors,
            ))
        }
        Ok(project) => {
            let title = project.title.clone();
            let id = state.repo.add_project(project).await?;
            info!("Added project {} ({})", id, title);
            state.redirect_with_flash(
                &headers,
                "/projects",
                Flash::success(format!(
                    "Project \"{}\" added successfully!",
                    flash::abbreviate(&title)
                )),
            )
        }
    }
}

pub(crate) async fn contact_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.render(
        &headers,
        Nav::Contact,
        "Contact",
        &pages::contact(&ContactForm::default()),
    )
}

pub(crate) async fn contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: std::result::Result<Form<ContactForm>, FormRejection>,
) -> Result<Response> {
    let form = form_or_default(form);
    let errors = form.validate();
    if !errors.is_empty() {
        debug!("Contact form rejected with {} errors", errors.len());
        let errors: Vec<Flash> = errors.into_iter().map(Flash::error).collect();
        return Ok(state.render_with(
            &headers,
            Nav::Contact,
            "Contact",
            &pages::contact(&form),
            errors,
        ));
    }

    // The submission itself is not persisted
    info!(
        newsletter = form.wants_newsletter(),
        "Contact form received from {}",
        form.first_name()
    );
    state.redirect_with_flash(
        &headers,
        "/thankyou",
        Flash::success(format!(
            "Thank you, {}! Your message has been received.",
            flash::abbreviate(form.first_name())
        )),
    )
}

pub(crate) async fn thank_you(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.render(&headers, Nav::Contact, "Thank You", &pages::thank_you())
}

pub(crate) async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response = state.render(&headers, Nav::None, "Not Found", &pages::not_found());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
