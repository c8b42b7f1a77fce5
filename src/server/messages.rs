//! Flash messages: short notices stored for the next page a user sees.
//!
//! [`FlashMessages`] attaches a [`MessageStore`] to every request. Messages from the
//! previous response are loaded from a cookie; whatever is still pending when the
//! response goes out is written back to that cookie.
use std::rc::Rc;

use actix_web::cookie::Cookie;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, HttpRequest};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use super::LocalBoxFuture;

/// Importance of a message, mirrored in how the page renders it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Development-only notice.
    Debug,
    /// Informational notice.
    Info,
    /// An action succeeded.
    Success,
    /// Something needs the user's attention.
    Warning,
    /// An action failed.
    Error,
}

/// A single flash message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Importance of the message.
    pub level: Level,
    /// Text shown to the user.
    pub text: String,
    /// Space separated tags the front end can style or filter on.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extra_tags: String,
}

impl Message {
    /// Create an untagged message.
    #[must_use]
    pub fn new(level: Level, text: &str) -> Self {
        Self {
            level,
            text: text.to_owned(),
            extra_tags: String::new(),
        }
    }

    /// Attach extra tags to the message.
    #[must_use]
    pub fn with_tags(mut self, tags: &str) -> Self {
        tags.clone_into(&mut self.extra_tags);
        self
    }
}

/// Failures when working with the message store.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum MessageError {
    /// The request went through no [`FlashMessages`] middleware.
    #[display(fmt = "No message store on this request. Is the FlashMessages middleware installed?")]
    NoStore,
}

impl std::error::Error for MessageError {}

/// What has to happen to the message cookie once a request is done.
#[derive(Debug, PartialEq, Eq)]
pub enum Persist {
    /// Leave the cookie as it is.
    Unchanged,
    /// Write these messages to the cookie.
    Store(Vec<Message>),
    /// Remove the cookie.
    Clear,
}

/// Per-request message storage.
#[derive(Debug, Default)]
pub struct MessageStore {
    /// Messages carried over from the previous response.
    loaded: Vec<Message>,
    /// Messages added while handling this request.
    queued: Vec<Message>,
    /// Set once the messages were read out for display.
    used: bool,
    /// Whether the request arrived with a message cookie that may need clearing.
    had_loaded: bool,
}

impl MessageStore {
    /// A store for a request that arrived with a message cookie.
    #[must_use]
    pub const fn with_loaded(loaded: Vec<Message>) -> Self {
        Self {
            loaded,
            queued: Vec::new(),
            used: false,
            had_loaded: true,
        }
    }

    /// Queue a message for the next page.
    pub fn add(&mut self, message: Message) {
        self.queued.push(message);
    }

    /// Messages not yet read, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Message> {
        self.loaded.iter().chain(self.queued.iter())
    }

    /// Read out every pending message for display. They won't be shown again.
    pub fn take(&mut self) -> Vec<Message> {
        self.used = true;
        let mut messages = std::mem::take(&mut self.loaded);
        messages.append(&mut self.queued);
        messages
    }

    /// Decide what the response must do with the message cookie.
    #[must_use]
    pub fn persist(&self) -> Persist {
        if self.used {
            if !self.queued.is_empty() {
                return Persist::Store(self.queued.clone());
            }
            if self.had_loaded {
                return Persist::Clear;
            }
            return Persist::Unchanged;
        }
        if self.queued.is_empty() {
            return Persist::Unchanged;
        }
        Persist::Store(self.pending().cloned().collect())
    }
}

/// Queue a message on the request's store.
///
/// # Errors
/// Errors if the request carries no [`MessageStore`].
pub fn add_message(req: &HttpRequest, message: Message) -> Result<(), MessageError> {
    let mut extensions = req.extensions_mut();
    let store = extensions
        .get_mut::<MessageStore>()
        .ok_or(MessageError::NoStore)?;
    store.add(message);
    Ok(())
}

/// Read out the request's pending messages for display.
/// Returns nothing when no store is attached.
pub fn take_messages(req: &HttpRequest) -> Vec<Message> {
    req.extensions_mut()
        .get_mut::<MessageStore>()
        .map(MessageStore::take)
        .unwrap_or_default()
}

/// Middleware that loads and stores flash messages through a cookie.
#[derive(Debug, Clone)]
pub struct FlashMessages {
    /// Name of the cookie holding the serialized messages.
    cookie_name: Rc<str>,
}

impl FlashMessages {
    /// Store messages in the cookie named `cookie_name`.
    #[must_use]
    pub fn new(cookie_name: &str) -> Self {
        Self {
            cookie_name: Rc::from(cookie_name),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for FlashMessages
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = FlashMessagesMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FlashMessagesMiddleware {
            service: Rc::new(service),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

/// Service produced by [`FlashMessages`].
pub struct FlashMessagesMiddleware<S> {
    /// Wrapped service.
    service: Rc<S>,
    /// Name of the message cookie.
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for FlashMessagesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let cookie_name = Rc::clone(&self.cookie_name);
        Box::pin(async move {
            let store = req
                .cookie(&cookie_name)
                .map_or_else(MessageStore::default, |cookie| {
                    MessageStore::with_loaded(decode(cookie.value()))
                });
            req.extensions_mut().insert(store);

            let mut res = service.call(req).await?;

            let persist = res
                .request()
                .extensions()
                .get::<MessageStore>()
                .map_or(Persist::Unchanged, MessageStore::persist);
            match persist {
                Persist::Unchanged => {}
                Persist::Store(messages) => {
                    let value = serde_json::to_string(&messages)?;
                    res.response_mut()
                        .add_cookie(&message_cookie(&cookie_name, value))?;
                }
                Persist::Clear => {
                    res.response_mut()
                        .add_removal_cookie(&message_cookie(&cookie_name, String::new()))?;
                }
            }
            Ok(res)
        })
    }
}

/// Cookie carrying serialized messages for the whole site.
fn message_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build(name.to_owned(), value)
        .path("/")
        .http_only(true)
        .finish()
}

/// Parse messages from a cookie value. A tampered or stale cookie yields no messages.
fn decode(value: &str) -> Vec<Message> {
    serde_json::from_str(value).unwrap_or_else(|err| {
        tracing::warn!("Discarding unreadable message cookie: {err}");
        Vec::new()
    })
}
