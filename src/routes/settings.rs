// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notification settings routes (admin only), including the manual
//! test-email triggers.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{Datelike, Local};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::EmailSettings;
use crate::services::reminder::{self, ReminderContext};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/settings/email",
            get(get_email_settings).put(update_email_settings),
        )
        .route("/api/settings/email/test", post(send_test_email))
        .route("/api/settings/email/test-ai", post(send_ai_test_email))
}

fn reminder_context(state: &AppState) -> ReminderContext {
    ReminderContext {
        birthdays: state.birthdays.clone(),
        settings: state.settings.clone(),
        mailer: state.mailer.clone(),
        ai: state.ai.clone(),
    }
}

/// Get email notification settings.
async fn get_email_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<EmailSettings>> {
    user.require_admin()?;
    Ok(Json(state.settings.get_email_settings()?))
}

/// Overwrite the settings record and restart the reminder job so the new
/// time takes effect.
async fn update_email_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(settings): Json<EmailSettings>,
) -> Result<Json<EmailSettings>> {
    user.require_admin()?;

    state.settings.save_email_settings(&settings)?;
    state.scheduler.reschedule(reminder_context(&state));

    Ok(Json(settings))
}

#[derive(Serialize)]
pub struct TestEmailResponse {
    pub message: String,
}

/// Send a test email immediately.
async fn send_test_email(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TestEmailResponse>> {
    user.require_admin()?;

    let settings = state.settings.get_email_settings()?;
    if !settings.enabled {
        return Err(AppError::BadRequest(
            "Email notifications are disabled".to_string(),
        ));
    }
    if settings.recipients.is_empty() {
        return Err(AppError::BadRequest("No recipients configured".to_string()));
    }

    let subject = "🎂 Birthday Tracker - Test Email";
    let body = "<html>\n<body>\n\
                <h2>🎂 Birthday Tracker - Test Email</h2>\n\
                <p>This is a test email from your Birthday Tracker application.</p>\n\
                <p><strong>If you received this, your email configuration is working correctly!</strong></p>\n\
                <hr>\n\
                <p><small>Sent from Birthday Tracker</small></p>\n\
                </body>\n</html>";

    if !state
        .mailer
        .send(subject, body, &settings.recipients, &settings)
        .await
    {
        return Err(AppError::Mail(
            "Failed to send test email. Check server logs for details.".to_string(),
        ));
    }

    Ok(Json(TestEmailResponse {
        message: format!(
            "Test email sent to {} recipient(s)",
            settings.recipients.len()
        ),
    }))
}

#[derive(Serialize)]
pub struct AiTestResponse {
    pub message: String,
    pub birthday_tested: String,
    pub days_until: i64,
}

/// Send a test email with AI-generated content for the next upcoming
/// birthday. Unlike the daily job, AI content is a hard requirement here:
/// the point of the endpoint is to prove the AI configuration works.
async fn send_ai_test_email(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AiTestResponse>> {
    user.require_admin()?;

    let settings = state.settings.get_email_settings()?;
    if !settings.enabled {
        return Err(AppError::BadRequest(
            "Email notifications are disabled".to_string(),
        ));
    }
    if settings.recipients.is_empty() {
        return Err(AppError::BadRequest("No recipients configured".to_string()));
    }
    if !settings.ai_enabled {
        return Err(AppError::BadRequest(
            "AI features are not enabled".to_string(),
        ));
    }
    if settings.openai_api_key.is_empty() {
        return Err(AppError::BadRequest(
            "OpenAI API key is not configured".to_string(),
        ));
    }

    // Soonest future occurrence across all dated records.
    let today = Local::now().date_naive();
    let all = state.birthdays.get_all()?;
    let next = all
        .iter()
        .filter_map(|b| {
            let day = b.day?;
            let occurrence = reminder::next_occurrence(today, b.month, day)?;
            Some((b, occurrence))
        })
        .min_by_key(|(_, occurrence)| *occurrence);

    let Some((birthday, occurrence)) = next else {
        return Err(AppError::BadRequest(
            "No birthdays found in the system".to_string(),
        ));
    };
    let days_until = (occurrence - today).num_days();

    let age = birthday
        .birth_year
        .map(|year| reminder::calculate_age(year, occurrence.year()));

    let suggestions = state
        .ai
        .suggest(
            &birthday.name,
            age,
            birthday.note.as_deref(),
            &settings.openai_api_key,
        )
        .await
        .ok_or_else(|| {
            AppError::Mail(
                "Failed to generate AI suggestions. Check your API key and server logs."
                    .to_string(),
            )
        })?;

    let subject = "🎂 Birthday Tracker - AI Test (Next Upcoming Birthday)";
    let mut body = String::from("<html><body>\n");
    body.push_str("<h2>🎂 AI Feature Test - Next Upcoming Birthday</h2>\n");
    body.push_str(
        "<p><em>This is a test email showing how AI will enhance your birthday reminders.</em></p>\n",
    );
    body.push_str(&format!(
        "<p><strong>Next birthday: {} ({days_until} days away)</strong></p>\n<hr>\n<ul>\n",
        occurrence.format("%B %d, %Y")
    ));
    body.push_str(&format!("<li><strong>{}</strong>", birthday.name));
    if let Some(age) = age {
        body.push_str(&format!(" (turning {age})"));
    }
    if let Some(note) = &birthday.note {
        body.push_str(&format!(" - <i>{note}</i>"));
    }
    reminder::append_ai_content(&mut body, &suggestions);
    body.push_str("</li>\n</ul>\n<hr>\n");
    body.push_str(
        "<p><small>This is a test email from your Birthday Tracker showing AI-enhanced \
         content.</small></p>\n</body></html>",
    );

    if !state
        .mailer
        .send(subject, &body, &settings.recipients, &settings)
        .await
    {
        return Err(AppError::Mail(
            "Failed to send test email. Check server logs for details.".to_string(),
        ));
    }

    Ok(Json(AiTestResponse {
        message: format!(
            "AI test email sent to {} recipient(s)",
            settings.recipients.len()
        ),
        birthday_tested: birthday.name.clone(),
        days_until,
    }))
}
