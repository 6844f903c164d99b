//! Session commands - one store operation per invocation.

use anyhow::Result;
use clap::Args;
use kvsession_store::{Error, KvBackend, Session, SessionStore};
use serde::Serialize;

use super::Context;

/// Arguments for the create command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Session id
    pub sid: String,

    /// Login of the user owning the session
    pub login: String,
}

/// Arguments for commands that take a single session id.
#[derive(Args, Debug)]
pub struct SidArgs {
    /// Session id
    pub sid: String,
}

#[derive(Debug, Serialize)]
struct CreateOutput<'a> {
    sid: &'a str,
    added: bool,
}

#[derive(Debug, Serialize)]
struct LoginOutput<'a> {
    sid: &'a str,
    login: Option<String>,
    available: bool,
}

#[derive(Debug, Serialize)]
struct ExistsOutput<'a> {
    sid: &'a str,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct DeleteOutput<'a> {
    sid: &'a str,
    deleted: bool,
}

/// Run the create command.
pub async fn create<B: KvBackend>(
    args: CreateArgs,
    store: &SessionStore<B>,
    ctx: &Context,
) -> Result<()> {
    let session = Session::new(args.sid, args.login);
    let added = store.create_session(&session).await?;

    if ctx.json_output {
        let output = CreateOutput {
            sid: &session.sid,
            added,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", create_message(&session, added));
    }

    Ok(())
}

/// `Ok(false)` covers both an unavailable cache and a write the read-back
/// could not see, so the negative message names neither.
fn create_message(session: &Session, added: bool) -> String {
    if added {
        format!("Session {} created for {}", session.sid, session.login)
    } else {
        format!("Session {} not confirmed", session.sid)
    }
}

/// Run the login command.
///
/// A missing session is an error; an unreachable cache is reported as
/// unavailable.
pub async fn login<B: KvBackend>(
    args: SidArgs,
    store: &SessionStore<B>,
    ctx: &Context,
) -> Result<()> {
    let login = match store.login_for(&args.sid).await {
        Ok(login) => login,
        Err(Error::NotFound(sid)) => anyhow::bail!("session {} not found", sid),
        Err(e) => return Err(e.into()),
    };

    if ctx.json_output {
        let output = LoginOutput {
            sid: &args.sid,
            available: login.is_some(),
            login,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match login {
            Some(login) => println!("{}", login),
            None => println!("Session cache unavailable"),
        }
    }

    Ok(())
}

/// Run the exists command.
pub async fn exists<B: KvBackend>(
    args: SidArgs,
    store: &SessionStore<B>,
    ctx: &Context,
) -> Result<()> {
    let exists = store.session_exists(&args.sid).await?;

    if ctx.json_output {
        let output = ExistsOutput {
            sid: &args.sid,
            exists,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if exists {
        println!("Session {} exists", args.sid);
    } else {
        println!("Session {} not found", args.sid);
    }

    Ok(())
}

/// Run the delete command.
pub async fn delete<B: KvBackend>(
    args: SidArgs,
    store: &SessionStore<B>,
    ctx: &Context,
) -> Result<()> {
    let deleted = store.delete_session(&args.sid).await?;

    if ctx.json_output {
        let output = DeleteOutput {
            sid: &args.sid,
            deleted,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Session {} deleted", args.sid);
    }

    Ok(())
}
