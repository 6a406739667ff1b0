//! Transport layer that traces every RPC call sent to the node together with
//! the label of the network it was sent to and how long the node took to
//! answer.
use {
    alloy::{
        rpc::json_rpc::{RequestPacket, ResponsePacket},
        transports::TransportError,
    },
    std::{
        fmt::Debug,
        pin::Pin,
        task::{Context, Poll},
        time::Instant,
    },
    tower::{Layer, Service},
};

pub(crate) struct InstrumentationLayer {
    pub label: String,
}

impl<S> Layer<S> for InstrumentationLayer {
    type Service = InstrumentedProvider<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentedProvider {
            inner,
            label: self.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InstrumentedProvider<S> {
    inner: S,
    label: String,
}

impl<S> Service<RequestPacket> for InstrumentedProvider<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static + Debug,
    S::Error: Send + 'static + Debug,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let methods: Vec<String> = req
            .requests()
            .iter()
            .map(|r| r.method().to_string())
            .collect();
        tracing::trace!(network = %self.label, ?methods, "executing request");

        let label = self.label.clone();
        let start = Instant::now();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let res = fut.await;
            match &res {
                Ok(_) => tracing::trace!(
                    network = %label,
                    ?methods,
                    elapsed = ?start.elapsed(),
                    "request completed"
                ),
                Err(err) => tracing::debug!(
                    network = %label,
                    ?methods,
                    elapsed = ?start.elapsed(),
                    ?err,
                    "request failed"
                ),
            }
            res
        })
    }
}
