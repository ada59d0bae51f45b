//! Integration tests for [`handler_chain::HandlerChain`] and [`handler_chain::run_event_loop`].
//!
//! Covers: handler before/after order, handler before stopping the chain, Reply stopping the chain
//! and being passed to handler after, Ignore falling through to the next handler, and the event loop
//! surviving handler errors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{
    Chat, DbotError, Handler, HandlerResponse, Message, MessageKind, ReplaySource, UpdateSource,
    User,
};
use handler_chain::{run_event_loop, HandlerChain, LoopStats};

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        kind: MessageKind::Text,
        created_at: Utc::now(),
    }
}

/// **Test: Handler before and after run; handle runs once.**
///
/// **Setup:** One handler (counts before/after), one handler (counts handle).
/// **Action:** `chain.handle(&message)`.
/// **Expected:** before_count=1, handle_count=1, after_count=1; response is Continue.
#[tokio::test]
async fn test_handler_chain_with_handler() {
    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let before_after_handler = Arc::new(TestBeforeAfterHandler::new(before_count.clone(), after_count.clone()));
    let handle_only = Arc::new(TestHandler::new(handle_count.clone()));

    let chain = HandlerChain::new()
        .add_handler(before_after_handler)
        .add_handler(handle_only);

    let message = create_test_message("test");
    chain.handle(&message).await.unwrap();

    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: Handler before returns false stops the chain; handle is not run.**
///
/// **Setup:** One blocking handler (before returns false), one handler.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Stop; handle_count=0.
#[tokio::test]
async fn test_handler_stops_chain() {
    struct BlockingHandler;

    #[async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(TestHandler::new(handle_count.clone()));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(handler);

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Handler returns Reply; chain stops and Reply is passed to handler after.**
///
/// **Setup:** One handler that in after() asserts Reply content; one handler that returns Reply("AI reply.").
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Reply("AI reply."); after_count=1 and handler sees the reply text.
#[tokio::test]
async fn test_handler_reply_stops_chain_and_passes_to_after() {
    struct ReplyHandler;

    #[async_trait]
    impl Handler for ReplyHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Reply("AI reply.".to_string()))
        }
    }

    let after_count = Arc::new(AtomicUsize::new(0));

    struct CaptureResponseHandler {
        after_count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Handler for CaptureResponseHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            Ok(true)
        }

        async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            if let HandlerResponse::Reply(text) = response {
                assert_eq!(text, "AI reply.");
            }
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponseHandler {
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(ReplyHandler));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("AI reply.".to_string()));
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: Multiple handlers run before in order (first, second), after in reverse (second, first).**
///
/// **Setup:** Two handlers that push "before_NAME" and "after_NAME" to a shared vec.
/// **Action:** `chain.handle(&message)` (handle phase returns Continue).
/// **Expected:** Order is before_first, before_second, after_second, after_first.
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    struct OrderHandler {
        name: String,
        order: Arc<std::sync::Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first".to_string(),
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second".to_string(),
            order: order.clone(),
        }));

    let message = create_test_message("test");
    chain.handle(&message).await.unwrap();

    let executed = order.lock().unwrap();
    assert_eq!(
        *executed,
        vec![
            "before_first",
            "before_second",
            "after_second",
            "after_first"
        ]
    );
}

/// **Test: Ignore falls through; the first Reply ends the handle phase.**
///
/// **Setup:** Ignore handler, Reply handler, counting handler (in that order).
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Reply("first"); the counting handler never runs.
#[tokio::test]
async fn test_ignore_falls_through_and_first_reply_wins() {
    struct IgnoreHandler;

    #[async_trait]
    impl Handler for IgnoreHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Ignore)
        }
    }

    struct FixedReply(&'static str);

    #[async_trait]
    impl Handler for FixedReply {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Ok(HandlerResponse::Reply(self.0.to_string()))
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(IgnoreHandler))
        .add_handler(Arc::new(FixedReply("first")))
        .add_handler(Arc::new(TestHandler::new(handle_count.clone())));
    assert_eq!(chain.len(), 3);

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("first".to_string()));
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Empty chain returns Continue.**
#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&create_test_message("test")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}

/// **Test: Event loop handles every replayed message and keeps going after a handler error.**
///
/// **Setup:** Handler that fails on content "boom" and counts the rest; source replays three messages.
/// **Action:** `run_event_loop(&source, &chain)`.
/// **Expected:** received=3, failed=1, handled=2; source is drained.
#[tokio::test]
async fn test_event_loop_survives_handler_error() {
    struct FailOnBoom {
        handled: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Handler for FailOnBoom {
        async fn handle(&self, message: &Message) -> dbot_core::Result<HandlerResponse> {
            if message.content == "boom" {
                return Err(DbotError::Bot("send failed".to_string()));
            }
            self.handled.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResponse::Stop)
        }
    }

    let handled = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new().add_handler(Arc::new(FailOnBoom {
        handled: handled.clone(),
    }));
    let source = ReplaySource::new(vec![
        create_test_message("one"),
        create_test_message("boom"),
        create_test_message("two"),
    ]);

    let stats = run_event_loop(&source, &chain).await.unwrap();

    assert_eq!(stats, LoopStats { received: 3, failed: 1 });
    assert_eq!(handled.load(Ordering::SeqCst), 2);
    assert_eq!(source.remaining().await, 0);
}

/// **Test: A source error ends the loop and is returned to the caller.**
#[tokio::test]
async fn test_event_loop_returns_source_error() {
    struct BrokenSource;

    #[async_trait]
    impl UpdateSource for BrokenSource {
        async fn next_update(&self) -> dbot_core::Result<Option<Message>> {
            Err(DbotError::Source("connection lost".to_string()))
        }
    }

    let chain = HandlerChain::new();
    let result = run_event_loop(&BrokenSource, &chain).await;

    assert!(matches!(result, Err(DbotError::Source(_))));
}

// --- Helpers used by tests ---

struct TestBeforeAfterHandler {
    before_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

impl TestBeforeAfterHandler {
    fn new(before_count: Arc<AtomicUsize>, after_count: Arc<AtomicUsize>) -> Self {
        Self { before_count, after_count }
    }
}

#[async_trait]
impl Handler for TestBeforeAfterHandler {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestHandler {
    handle_count: Arc<AtomicUsize>,
}

impl TestHandler {
    fn new(handle_count: Arc<AtomicUsize>) -> Self {
        Self { handle_count }
    }
}

#[async_trait]
impl Handler for TestHandler {
    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}
