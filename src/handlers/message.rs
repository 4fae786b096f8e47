//! `/msg TEXT...` and unmarked lines.

use super::{Context, Handler, HandlerError, HandlerResult};
use tracing::{debug, warn};

pub struct MessageHandler;

impl Handler for MessageHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let origin = ctx.origin;
        let session = ctx.session()?;
        let room_name = session.room.as_deref().ok_or(HandlerError::NotInRoom)?;
        let line = format!("{}: {}", session.nick, ctx.args.join(" "));

        let Some(room) = ctx.state.rooms.get(room_name) else {
            warn!(session = %origin, room = %room_name, "Cached room missing from registry");
            return Err(HandlerError::Internal(format!("room {room_name} vanished")));
        };

        let delivered = room.broadcast(origin, &line);
        debug!(session = %origin, room = %room_name, delivered, "Message broadcast");
        Ok(())
    }
}
