use crate::{error, error::PlaylistError, info, success, warning};

use super::{Context, report};

pub async fn register(email: String, password: String) {
    let ctx = Context::open();
    match ctx.gate.register(&ctx.directory, email.trim(), &password).await {
        Ok(session) => success!("Account {} created and logged in", session.email),
        Err(e) => report(e),
    }
}

pub async fn login(email: String, password: String) {
    let mut ctx = Context::open();
    let session = match ctx.gate.login(&ctx.directory, email.trim(), &password).await {
        Ok(session) => session,
        Err(e) => return report(e),
    };

    match ctx.playlists.load(&session.account_id).await {
        Ok(playlists) => success!(
            "Logged in as {} ({} playlists)",
            session.email,
            playlists.len()
        ),
        Err(e) => error!("Logged in, but failed to load playlists: {}", e),
    }
}

pub async fn logout() {
    let mut ctx = Context::open();
    let session = match ctx.gate.require().await {
        Ok(session) => session,
        Err(PlaylistError::Unauthenticated) => {
            info!("No active session");
            return;
        }
        Err(e) => error!("Failed to read session: {}", e),
    };

    match ctx.gate.logout(&session, &mut ctx.playlists).await {
        Ok(()) => success!("Logged out {}", session.email),
        Err(e) => report(e),
    }
}

pub async fn whoami() {
    let ctx = Context::open();
    let session = match ctx.gate.require().await {
        Ok(session) => session,
        Err(PlaylistError::Unauthenticated) => {
            warning!("Not logged in");
            return;
        }
        Err(e) => error!("Failed to read session: {}", e),
    };

    match ctx.directory.find(&session.account_id).await {
        Ok(Some(account)) => info!(
            "Logged in as {} (account {}) since {}",
            account.email,
            account.id,
            session.logged_in_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Ok(None) => warning!(
            "Session for {} points at an account that no longer exists",
            session.email
        ),
        Err(e) => report(e),
    }
}
