//! `/join ROOM`
//!
//! Leaving the previous room happens before the join notice, so members of
//! the old room always see "has left" before members of the new room see
//! "has joined". Rejoining the current room skips the leave and repeats the
//! join notice and welcome.

use super::{Context, Handler, HandlerError, HandlerResult};
use tracing::info;

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let room_name = ctx.required_arg(HandlerError::MissingRoom)?;
        let origin = ctx.origin;

        let (nick, handle, switching) = {
            let session = ctx.session()?;
            let switching = session
                .room
                .as_deref()
                .is_some_and(|current| current != room_name);
            (session.nick.clone(), session.handle.clone(), switching)
        };

        if switching {
            ctx.state.leave_current_room(origin);
        }

        let room = ctx.state.rooms.get_or_create(room_name);
        room.insert(handle.clone());
        room.broadcast(origin, &format!("{nick} has joined the room"));
        let members = room.len();

        ctx.session_mut()?.room = Some(room_name.to_string());
        info!(session = %origin, room = %room_name, nick = %nick, members, "Joined room");

        handle.deliver(format!("welcome to {room_name}"));
        Ok(())
    }
}
