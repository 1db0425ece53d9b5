//! Ordered interceptor chain wrapped around a terminal route handler.
//!
//! A [`Pipeline`] is built once while the router is assembled. Each call to
//! [`Pipeline::layer`] snapshots the stages registered so far, so routes
//! attached before a later [`Pipeline::push`] keep their shorter chain.
//! Stage 0 is the outermost: it sees the request first and the response last.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::IntoResponse;
use axum::response::Response;
use tower::util::BoxCloneService;
use tower::Layer;
use tower::Service;
use tower::ServiceExt;

/// A single pipeline stage.
///
/// Implementations either return a response directly (short-circuit) or
/// delegate to [`Next::run`] and may inspect the response it produces.
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request, next: Next) -> Response;
}

/// The remainder of the chain after the current stage.
pub struct Next {
    stages: Arc<[Arc<dyn Interceptor>]>,
    position: usize,
    terminal: BoxCloneService<Request, Response, Infallible>,
}

impl Next {
    /// Run the next stage, or the terminal handler once all stages are done.
    pub async fn run(self, request: Request) -> Response {
        let stage = self.stages.get(self.position).cloned();
        match stage {
            Some(stage) => {
                let next = Next {
                    stages: self.stages,
                    position: self.position + 1,
                    terminal: self.terminal,
                };
                stage.intercept(request, next).await
            }
            None => match self.terminal.oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            },
        }
    }
}

#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Interceptor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Pipeline::push`].
    pub fn with<I: Interceptor>(mut self, interceptor: I) -> Self {
        self.push(interceptor);
        self
    }

    /// Append a stage after the ones already registered.
    pub fn push<I: Interceptor>(&mut self, interceptor: I) {
        self.stages.push(Arc::new(interceptor));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Freeze the current stages into a tower layer.
    pub fn layer(&self) -> PipelineLayer {
        PipelineLayer {
            stages: self.stages.clone().into(),
        }
    }
}

#[derive(Clone)]
pub struct PipelineLayer {
    stages: Arc<[Arc<dyn Interceptor>]>,
}

impl<S> Layer<S> for PipelineLayer {
    type Service = PipelineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PipelineService {
            stages: self.stages.clone(),
            inner,
        }
    }
}

#[derive(Clone)]
pub struct PipelineService<S> {
    stages: Arc<[Arc<dyn Interceptor>]>,
    inner: S,
}

impl<S> Service<Request> for PipelineService<S>
where
    S: Service<Request, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Readiness of the terminal is awaited by `oneshot` at the end of the chain.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let terminal = self
            .inner
            .clone()
            .map_response(|response| response.into_response());

        let next = Next {
            stages: self.stages.clone(),
            position: 0,
            terminal: BoxCloneService::new(terminal),
        };

        Box::pin(async move { Ok(next.run(request).await) })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http;
    use axum::http::StatusCode;
    use tower::service_fn;

    use super::*;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Interceptor for Recorder {
        async fn intercept(&self, request: Request, next: Next) -> Response {
            self.log.lock().unwrap().push(format!("{}:before", self.name));
            let response = next.run(request).await;
            self.log.lock().unwrap().push(format!("{}:after", self.name));
            response
        }
    }

    struct Reject {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Interceptor for Reject {
        async fn intercept(&self, _request: Request, _next: Next) -> Response {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StatusCode::FORBIDDEN.into_response()
        }
    }

    struct Counter {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Interceptor for Counter {
        async fn intercept(&self, request: Request, next: Next) -> Response {
            self.calls.fetch_add(1, Ordering::SeqCst);
            next.run(request).await
        }
    }

    fn counting_terminal(calls: Arc<AtomicUsize>) -> BoxCloneService<Request, Response, Infallible> {
        BoxCloneService::new(service_fn(move |_request: Request| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(StatusCode::OK.into_response())
            }
        }))
    }

    fn request() -> Request {
        http::Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_stages_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let terminal_calls = Arc::new(AtomicUsize::new(0));

        let pipeline = Pipeline::new()
            .with(Recorder {
                name: "A",
                log: log.clone(),
            })
            .with(Recorder {
                name: "B",
                log: log.clone(),
            });

        let service = pipeline.layer().layer(counting_terminal(terminal_calls.clone()));
        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(terminal_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["A:before", "B:before", "B:after", "A:after"]
        );
    }

    #[tokio::test]
    async fn test_short_circuit_skips_rest_of_chain() {
        let reject_calls = Arc::new(AtomicUsize::new(0));
        let counter_calls = Arc::new(AtomicUsize::new(0));
        let terminal_calls = Arc::new(AtomicUsize::new(0));

        let pipeline = Pipeline::new()
            .with(Reject {
                calls: reject_calls.clone(),
            })
            .with(Counter {
                calls: counter_calls.clone(),
            });

        let service = pipeline.layer().layer(counting_terminal(terminal_calls.clone()));
        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(reject_calls.load(Ordering::SeqCst), 1);
        assert_eq!(counter_calls.load(Ordering::SeqCst), 0);
        assert_eq!(terminal_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_pipeline_calls_terminal() {
        let terminal_calls = Arc::new(AtomicUsize::new(0));

        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());

        let service = pipeline.layer().layer(counting_terminal(terminal_calls.clone()));
        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(terminal_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_layer_snapshot_ignores_later_push() {
        let counter_calls = Arc::new(AtomicUsize::new(0));
        let terminal_calls = Arc::new(AtomicUsize::new(0));

        let mut pipeline = Pipeline::new();
        let before = pipeline.layer();
        pipeline.push(Counter {
            calls: counter_calls.clone(),
        });
        assert_eq!(pipeline.len(), 1);

        let service = before.layer(counting_terminal(terminal_calls.clone()));
        service.oneshot(request()).await.unwrap();

        assert_eq!(counter_calls.load(Ordering::SeqCst), 0);
        assert_eq!(terminal_calls.load(Ordering::SeqCst), 1);
    }
}
