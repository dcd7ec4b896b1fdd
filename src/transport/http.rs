//! HTTP transport
//!
//! Maps the broker's three operations onto JSON endpoints:
//! - `POST /attachQueue` with `{"queueId", "topic"}`
//! - `POST /publish` with `{"topic", "data"}`
//! - `GET /get?queueId=...` returning `{"messages": [...]}`
//!
//! Malformed bodies, malformed query strings and a missing `queueId` are
//! rejected with `400` and an `{"error": ...}` body before the broker is
//! called.

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, Responder, web};
use tracing::{debug, info, warn};

use crate::broker::Broker;
use crate::transport::message::{
    AttachRequest, ErrorResponse, GetQuery, MISSING_QUEUE_ID, MessagesResponse, PublishRequest,
    StatusResponse,
};

/// Register the broker routes on an actix `App`. The broker itself must be
/// provided as `web::Data<Broker>` app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/attachQueue", web::post().to(attach_queue))
        .route("/publish", web::post().to(publish))
        .route("/get", web::get().to(get_messages));
}

pub async fn start_http_server(host: &str, port: u16, broker: Arc<Broker>) -> std::io::Result<()> {
    let broker = web::Data::from(broker);

    let server = HttpServer::new(move || App::new().app_data(broker.clone()).configure(configure))
        .bind((host, port))?;

    info!("HTTP server listening on http://{host}:{port}");
    server.run().await
}

async fn attach_queue(broker: web::Data<Broker>, body: web::Json<AttachRequest>) -> impl Responder {
    let AttachRequest { queue_id, topic } = body.into_inner();
    broker.attach_queue(queue_id, &topic);
    HttpResponse::Ok().json(StatusResponse::ok())
}

async fn publish(broker: web::Data<Broker>, body: web::Json<PublishRequest>) -> impl Responder {
    let PublishRequest { topic, data } = body.into_inner();
    let delivered = broker.publish(&topic, data);
    debug!(%topic, delivered, "HTTP publish");
    HttpResponse::Ok().json(StatusResponse::ok())
}

async fn get_messages(broker: web::Data<Broker>, query: web::Query<GetQuery>) -> impl Responder {
    match query.into_inner().queue_id {
        Some(id) if !id.is_empty() => {
            let messages = broker.drain_queue(&id);
            HttpResponse::Ok().json(MessagesResponse { messages })
        }
        _ => HttpResponse::BadRequest().json(ErrorResponse::new(MISSING_QUEUE_ID)),
    }
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), "Rejected request body: {err}");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), "Rejected query string: {err}");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
    InternalError::from_response(err, response).into()
}
