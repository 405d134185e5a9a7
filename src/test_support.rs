//! Local HTTP server for exercising the executor and dispatch loop.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const MAX_HEAD_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TestResponse {
    pub status: u16,
    pub delay: Duration,
}

impl TestResponse {
    pub(crate) const fn status(status: u16) -> Self {
        Self {
            status,
            delay: Duration::ZERO,
        }
    }

    pub(crate) const fn delayed(status: u16, delay: Duration) -> Self {
        Self { status, delay }
    }
}

type Responder = dyn Fn(u64) -> TestResponse + Send + Sync;

pub(crate) struct TestServer {
    pub url: String,
    heads: Arc<Mutex<Vec<String>>>,
    accept_task: JoinHandle<()>,
}

impl TestServer {
    /// Raw request heads received so far, in arrival order.
    pub(crate) fn request_heads(&self) -> Result<Vec<String>, String> {
        self.heads
            .lock()
            .map(|heads| heads.clone())
            .map_err(|err| format!("request log poisoned: {}", err))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// Binds an ephemeral port and answers each request with `respond(index)`,
/// where `index` counts requests from zero.
pub(crate) async fn spawn_test_server<F>(respond: F) -> Result<TestServer, String>
where
    F: Fn(u64) -> TestResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    let respond: Arc<Responder> = Arc::new(respond);
    let counter = Arc::new(AtomicU64::new(0));
    let heads = Arc::new(Mutex::new(Vec::new()));
    let heads_task = heads.clone();

    let accept_task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let respond = respond.clone();
            let counter = counter.clone();
            let heads = heads_task.clone();
            tokio::spawn(async move {
                drop(handle_client(stream, &*respond, &counter, &heads).await);
            });
        }
    });

    Ok(TestServer {
        url: format!("http://{}", addr),
        heads,
        accept_task,
    })
}

async fn handle_client(
    mut stream: TcpStream,
    respond: &Responder,
    counter: &AtomicU64,
    heads: &Mutex<Vec<String>>,
) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buffer = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") && head.len() < MAX_HEAD_BYTES {
        let read = stream.read(&mut buffer).await?;
        if read == 0 {
            return Ok(());
        }
        head.extend_from_slice(buffer.get(..read).unwrap_or_default());
    }

    let index = counter.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut guard) = heads.lock() {
        guard.push(String::from_utf8_lossy(&head).into_owned());
    }

    let response = respond(index);
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }
    let reply = format!(
        "HTTP/1.1 {} Test\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        response.status
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.flush().await?;
    stream.shutdown().await
}

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: std::future::Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}
