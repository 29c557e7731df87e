use actix_web::web::Payload;
use actix_web::{get, web, Error, HttpRequest, HttpResponse, Responder};
use actix_ws::{Message, Session};
use async_trait::async_trait;
use futures_util::StreamExt as _;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::registry::MessageSink;
use crate::Relay;

#[async_trait(?Send)]
impl MessageSink for Session {
    async fn send_text(&mut self, text: String) -> Result<(), ()> {
        self.text(text).await.map_err(|_| ())
    }

    async fn ping(&mut self) -> Result<(), ()> {
        self.ping(b"").await.map_err(|_| ())
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[get("/ws")]
pub async fn ws(
    req: HttpRequest,
    body: Payload,
    relay: web::Data<Relay>,
) -> Result<HttpResponse, Error> {
    let (response, mut session, mut stream) = actix_ws::handle(&req, body)?;

    let id = relay.register(session.clone());
    log::info!("client {id} connected ({} online)", relay.len());

    if session
        .send_text(ServerMessage::welcome().to_json())
        .await
        .is_err()
    {
        relay.unregister(id);
        return Ok(response);
    }

    let relay = relay.into_inner();
    actix_web::rt::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => handle_frame(&relay, &mut session, &text).await,
                Message::Ping(bytes) => {
                    let _ = session.pong(&bytes).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }

        relay.unregister(id);
        log::info!("client {id} disconnected");
        let _ = session.close(None).await;
    });

    Ok(response)
}

async fn handle_frame(relay: &Relay, session: &mut Session, raw: &str) {
    match ClientMessage::parse(raw) {
        Ok(message) => relay.broadcast(&ServerMessage::broadcast_for(message)).await,
        // Unicast the reason back to the sender only.
        Err(reason) => {
            let _ = session.send_text(ServerMessage::error(reason).to_json()).await;
        }
    }
}
