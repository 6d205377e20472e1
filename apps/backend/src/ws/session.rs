//! Per-connection WebSocket session actor.
//!
//! The session parses inbound intents, routes them to the game-flow
//! handlers, and delivers the resulting notifications through the hub.
//! Rejections go back to this connection only; a socket close or heartbeat
//! timeout becomes a disconnect event against the seat registry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::game_flow::{self, Outbound};
use crate::state::app_state::AppState;
use crate::ws::hub::{ConnId, Deliver};
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(default)]
    admin_token: Option<String>,
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<WsQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let state = data.into_inner();
    let is_admin = match (&state.admin_token, &query.admin_token) {
        (Some(expected), Some(given)) => expected == given,
        _ => false,
    };
    let session = WsSession::new(Uuid::new_v4(), state, is_admin);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: ConnId,
    state: Arc<AppState>,
    is_admin: bool,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: ConnId, state: Arc<AppState>, is_admin: bool) -> Self {
        Self {
            conn_id,
            state,
            is_admin,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(&self, ctx: &mut ws::WebsocketContext<Self>, message: &str) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                message: message.to_string(),
            },
        );
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn server_stats(&self) -> Result<Vec<Outbound>, DomainError> {
        if !self.is_admin {
            return Err(DomainError::validation(
                ValidationKind::NotAdmin,
                "Server stats are restricted",
            ));
        }
        Ok(vec![Outbound::new(
            self.conn_id,
            ServerMsg::ServerStats {
                stats: self.state.stats_snapshot(),
            },
        )])
    }

    fn dispatch(&self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let result = match cmd {
            ClientMsg::JoinRoom {
                room_id,
                name,
                team,
                is_reconnect,
            } => game_flow::handle_join(&self.state, self.conn_id, &room_id, &name, team, is_reconnect),
            ClientMsg::SelectTrump { room_id, trump } => {
                game_flow::handle_select_trump(&self.state, self.conn_id, &room_id, trump)
            }
            ClientMsg::PlayCard {
                room_id,
                card_index,
            } => game_flow::handle_play_card(&self.state, self.conn_id, &room_id, card_index),
            ClientMsg::GetServerStats => self.server_stats(),
        };

        match result {
            Ok(out) => self.state.hub.deliver_all(out),
            Err(err) => {
                // Rejections are per-connection and never fatal.
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        message: err.to_string(),
                    },
                );
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        let recipient = ctx.address().recipient::<Deliver>();
        self.state.hub.register(self.conn_id, recipient);
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.state.hub.unregister(self.conn_id);
        let out = game_flow::handle_disconnect(&self.state, self.conn_id);
        self.state.hub.deliver_all(out);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.dispatch(cmd, ctx),
                    Err(_) => self.send_error_and_close(ctx, "Malformed JSON"),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Deliver> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
