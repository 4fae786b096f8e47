//! `/nick NAME`

use super::{Context, Handler, HandlerError, HandlerResult};
use tracing::info;

pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let nick = ctx.required_arg(HandlerError::MissingNick)?;
        let origin = ctx.origin;
        let session = ctx.session_mut()?;

        let old = std::mem::replace(&mut session.nick, nick.to_string());
        info!(session = %origin, old = %old, new = %nick, "Nick changed");

        session
            .handle
            .deliver(format!("all right, I will call you {nick}"));
        Ok(())
    }
}
