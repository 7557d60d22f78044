//! Demo endpoints: sign in, read the session, refresh it, sign out.

use actix_web::{web, HttpResponse};
use claims_session::web::{removal_cookie, session_cookie, Authenticated, Identify, RequestLog};
use claims_session::{claims_record, issue, DefaultSession, Payload, SessionError, Shape};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Session payload carried by demo tokens.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: i64,
}

claims_record!(Profile { id, name, age });

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn login(req: web::Json<Profile>) -> Result<HttpResponse, SessionError> {
    let token = issue(&req.0)?;
    info!(user_id = %req.id, "Session issued");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token))
        .json(LoginResponse { token }))
}

fn profile_of(session: Authenticated<Payload<Profile>>) -> Result<Profile, SessionError> {
    session
        .into_inner()
        .into_typed()
        .ok_or_else(SessionError::not_reconciled)
}

async fn me(session: Authenticated<Payload<Profile>>) -> Result<HttpResponse, SessionError> {
    Ok(HttpResponse::Ok().json(profile_of(session)?))
}

/// Re-issue the verified payload with a fresh expiry.
async fn refresh(session: Authenticated<Payload<Profile>>) -> Result<HttpResponse, SessionError> {
    let profile = profile_of(session)?;
    let token = issue(&profile)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token))
        .json(LoginResponse { token }))
}

async fn logout() -> HttpResponse {
    HttpResponse::NoContent().cookie(removal_cookie()).finish()
}

fn identify() -> Identify<DefaultSession<Profile>> {
    Identify::new(|| DefaultSession::new(Shape::Record))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
    cfg.service(web::resource("/logout").route(web::post().to(logout)));
    cfg.service(
        web::scope("/api")
            .wrap(identify())
            .wrap(RequestLog)
            .route("/me", web::get().to(me))
            .route("/refresh", web::post().to(refresh)),
    );
}
