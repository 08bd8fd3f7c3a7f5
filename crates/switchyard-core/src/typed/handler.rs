//! Handler trait - decode 済みメッセージを処理する Handler の定義

use super::message::Message;
use crate::error::HandlerError;

/// Handler は 1 種類のメッセージを受け取って処理する
///
/// # 使用例
/// ```ignore
/// struct StartHandler;
///
/// impl Handler<StartMessage> for StartHandler {
///     fn handle(&mut self, message: StartMessage) -> Result<(), HandlerError> {
///         println!("starting with {}GB", message.memory);
///         Ok(())
///     }
/// }
/// ```
///
/// # ジェネリクスによる型安全性
/// - `Handler<StartMessage>` は `StartMessage` しか受け取れない
/// - 1 つの型が複数の `Handler<M>` を実装して variant 集合全体を受け持てる
pub trait Handler<M: Message> {
    fn handle(&mut self, message: M) -> Result<(), HandlerError>;
}

impl<M, F> Handler<M> for F
where
    M: Message,
    F: FnMut(M) -> Result<(), HandlerError>,
{
    fn handle(&mut self, message: M) -> Result<(), HandlerError> {
        self(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
    }

    impl Message for Ping {
        const KIND: &'static str = "ping";
    }

    fn deliver<H: Handler<Ping>>(handler: &mut H, message: Ping) -> Result<(), HandlerError> {
        handler.handle(message)
    }

    #[test]
    fn closures_are_handlers() {
        let mut seen = Vec::new();
        deliver(
            &mut |ping: Ping| -> Result<(), HandlerError> {
                seen.push(ping.seq);
                Ok(())
            },
            Ping { seq: 7 },
        )
        .unwrap();
        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn handler_errors_pass_through() {
        let mut refuse = |_: Ping| -> Result<(), HandlerError> { Err(HandlerError::new("busy")) };
        let err = deliver(&mut refuse, Ping::default()).unwrap_err();
        assert_eq!(err.to_string(), "busy");
    }
}
