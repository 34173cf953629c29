//! Callback-style `fetch` on top of the JS promise chain.
//!
//! Every promise handler of a request is parked in its [`Pending`] state and
//! dropped when the request settles, so nothing outlives the request.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Request, RequestInit, Response};

use crate::error::{AquariumError, AquariumResult};

type Callback = Box<dyn FnOnce(AquariumResult<String>)>;
type Handler = Closure<dyn FnMut(JsValue)>;

struct Pending<H> {
    on_done: Option<Callback>,
    handlers: Vec<H>,
}

type Shared<H> = Rc<RefCell<Pending<H>>>;

fn pending<H>(on_done: impl FnOnce(AquariumResult<String>) + 'static) -> Shared<H> {
    Rc::new(RefCell::new(Pending {
        on_done: Some(Box::new(on_done)),
        handlers: Vec::new(),
    }))
}

fn hold<H>(pending: &Shared<H>, handler: H) {
    pending.borrow_mut().handlers.push(handler);
}

/// Runs the callback at most once, then releases the handlers.
fn finish<H>(pending: &Shared<H>, result: AquariumResult<String>) {
    let (callback, handlers) = {
        let mut state = pending.borrow_mut();
        (state.on_done.take(), mem::take(&mut state.handlers))
    };
    if let Some(callback) = callback {
        callback(result);
    }
    // A handler dropped while it is running is freed once it returns.
    drop(handlers);
}

fn then(promise: &Promise, ok: Handler, pending: &Shared<Handler>) {
    let err: Handler = {
        let pending = pending.clone();
        Closure::once(move |err: JsValue| finish(&pending, Err(err.into())))
    };
    let _ = promise.then2(&ok, &err);
    hold(pending, ok);
    hold(pending, err);
}

/// Sends `request` and hands the body text to `on_done`. Non-2xx responses
/// become [`AquariumError::Http`].
pub fn send(request: Request, on_done: impl FnOnce(AquariumResult<String>) + 'static) {
    let state: Shared<Handler> = pending(on_done);
    let Some(window) = web_sys::window() else {
        finish(&state, Err(AquariumError::Js("no window".into())));
        return;
    };
    let on_response: Handler = {
        let state = state.clone();
        Closure::once(move |value: JsValue| {
            let response: Response = match value.dyn_into() {
                Ok(r) => r,
                Err(v) => return finish(&state, Err(v.into())),
            };
            if !response.ok() {
                return finish(&state, Err(AquariumError::Http { status: response.status() }));
            }
            match response.text() {
                Ok(body) => {
                    let on_body: Handler = {
                        let state = state.clone();
                        Closure::once(move |text: JsValue| {
                            finish(&state, Ok(text.as_string().unwrap_or_default()))
                        })
                    };
                    then(&body, on_body, &state);
                }
                Err(err) => finish(&state, Err(err.into())),
            }
        })
    };
    let promise = window.fetch_with_request(&request);
    then(&promise, on_response, &state);
}

pub fn get(url: &str, on_done: impl FnOnce(AquariumResult<String>) + 'static) {
    match Request::new_with_str(url) {
        Ok(request) => send(request, on_done),
        Err(err) => on_done(Err(err.into())),
    }
}

pub fn post_json(url: &str, body: &str, on_done: impl FnOnce(AquariumResult<String>) + 'static) {
    match json_request(url, body) {
        Ok(request) => send(request, on_done),
        Err(err) => on_done(Err(err.into())),
    }
}

fn json_request(url: &str, body: &str) -> Result<Request, JsValue> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));
    let request = Request::new_with_str_and_init(url, &init)?;
    request.headers().set("Content-Type", "application/json")?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::Cell;

    use super::*;

    #[test]
    fn settling_runs_callback_once_and_drops_handlers() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let state: Shared<Rc<()>> = pending(move |result| {
            assert_eq!(result.unwrap(), "body");
            seen.set(seen.get() + 1);
        });
        let handler = Rc::new(());
        hold(&state, handler.clone());
        hold(&state, handler.clone());
        assert_eq!(Rc::strong_count(&handler), 3);

        finish(&state, Ok("body".into()));
        finish(&state, Err(AquariumError::Http { status: 500 }));
        assert_eq!(calls.get(), 1);
        assert_eq!(Rc::strong_count(&handler), 1);
    }

    #[test]
    fn handlers_holding_the_request_are_released() {
        let state: Shared<Box<dyn Any>> = pending(|result| {
            assert!(matches!(result, Err(AquariumError::Http { status: 404 })));
        });
        hold(&state, Box::new(state.clone()) as Box<dyn Any>);
        hold(&state, Box::new(state.clone()) as Box<dyn Any>);
        assert_eq!(Rc::strong_count(&state), 3);

        finish(&state, Err(AquariumError::Http { status: 404 }));
        assert_eq!(Rc::strong_count(&state), 1);
        assert!(state.borrow().handlers.is_empty());
    }
}
