//! Integration tests module for RAPID
//!
//! Every test drives an [`Interpreter`] line by line against a local
//! `wiremock` server, the same way the REPL does.

pub mod request_forms_test;
pub mod session_flow_test;

use rapid::executor::ExecutionConfig;
use rapid::interpreter::{Flow, Interpreter};
use rapid::variables::VariableStore;
use wiremock::MockServer;

/// Starts a mock server and an interpreter pointed at it.
pub async fn start() -> (MockServer, Interpreter) {
    start_with(VariableStore::new()).await
}

/// Same as [`start`], starting from a pre-populated store.
pub async fn start_with(store: VariableStore) -> (MockServer, Interpreter) {
    let server = MockServer::start().await;
    let client = ExecutionConfig::default()
        .build_client()
        .expect("client builds");
    let interpreter = Interpreter::new(server.uri(), store, client);
    (server, interpreter)
}

/// Evaluates `line` and returns its output, failing on exit.
pub async fn eval(interpreter: &mut Interpreter, line: &str) -> String {
    match interpreter.eval_line(line).await {
        Flow::Continue(output) => output,
        Flow::Exit => panic!("'{}' ended the session", line),
    }
}
