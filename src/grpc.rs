//! gRPC transport for the scaling service (`grpc` feature).
//!
//! [`RemoteScaler`] implements [`ScalingService`] by calling `scaling.v1.Scaler/Scale`;
//! [`ScalerSvc`] serves the same RPC from the in-process engine, plus a
//! `Health` RPC for liveness checks.

use std::net::SocketAddr;

use tokio::runtime::Runtime;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Response, Status};

use crate::data::axis::Axis;
use crate::data::scaling::{self, ScalingRequest, ScalingResponse};
use crate::error::ScaleError;
use crate::service::ScalingService;

pub mod proto {
    pub mod v1 {
        tonic::include_proto!("scaling.v1");
    }
}

use proto::v1::scaler_client::ScalerClient;
use proto::v1::scaler_server::{Scaler, ScalerServer};
use proto::v1::{HealthRequest, HealthResponse, ScaleRequest, ScaleResponse};

/// Service name reported by the `Health` RPC.
pub const SERVICE_NAME: &str = "axis-scaler";

// ---------- Conversions ----------

impl From<&ScalingRequest> for ScaleRequest {
    fn from(r: &ScalingRequest) -> Self {
        Self {
            x_input: r.x_input.clone(),
            y_input: r.y_input.clone(),
            z_input: r.z_input.clone(),
            x1: r.x1.clone(),
            x2: r.x2.clone(),
            y1: r.y1.clone(),
            y2: r.y2.clone(),
            z1: r.z1.clone(),
            z2: r.z2.clone(),
            scale_from: r.scale_from.id().to_string(),
            z_in_hex: r.z_in_hex,
        }
    }
}

impl TryFrom<ScaleRequest> for ScalingRequest {
    type Error = Status;

    fn try_from(r: ScaleRequest) -> Result<Self, Status> {
        let scale_from = Axis::from_id(&r.scale_from)
            .ok_or_else(|| Status::invalid_argument("scale_from must be 'x', 'y', or 'z'"))?;
        Ok(Self {
            x_input: r.x_input,
            y_input: r.y_input,
            z_input: r.z_input,
            x1: r.x1,
            x2: r.x2,
            y1: r.y1,
            y2: r.y2,
            z1: r.z1,
            z2: r.z2,
            scale_from,
            z_in_hex: r.z_in_hex,
        })
    }
}

impl From<ScaleResponse> for ScalingResponse {
    fn from(r: ScaleResponse) -> Self {
        Self { x: r.x, y: r.y, z: r.z }
    }
}

impl From<ScalingResponse> for ScaleResponse {
    fn from(r: ScalingResponse) -> Self {
        Self { x: r.x, y: r.y, z: r.z }
    }
}

/// Map a non-success status to a [`ScaleError`]. Argument-type codes mean
/// the server rejected the request; anything else is a transport failure.
pub fn status_to_error(status: Status) -> ScaleError {
    match status.code() {
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            ScaleError::Rejected(status.message().to_string())
        }
        _ => ScaleError::Transport(status.to_string()),
    }
}

// ---------- Client ----------

/// Blocking client for a remote scaling server.
///
/// Owns its own tokio runtime; `scale` must not be called from inside another runtime.
pub struct RemoteScaler {
    runtime: Runtime,
    channel: Channel,
    endpoint: String,
}

impl RemoteScaler {
    /// Prepare a client for `endpoint` (e.g. `http://127.0.0.1:8001`). Connects lazily.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ScaleError> {
        let endpoint = endpoint.into();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| ScaleError::Transport(format!("failed to start runtime: {e}")))?;
        let channel = {
            let _guard = runtime.enter();
            Endpoint::from_shared(endpoint.clone())
                .map_err(|e| ScaleError::Transport(format!("invalid endpoint {endpoint:?}: {e}")))?
                .connect_lazy()
        };
        Ok(Self {
            runtime,
            channel,
            endpoint,
        })
    }

    /// Ask the server whether it is serving. Returns the reported status text.
    pub fn health(&self) -> Result<String, ScaleError> {
        let mut client = ScalerClient::new(self.channel.clone());
        self.runtime.block_on(async move {
            client
                .health(Request::new(HealthRequest {}))
                .await
                .map(|resp| resp.into_inner().status)
                .map_err(status_to_error)
        })
    }
}

impl ScalingService for RemoteScaler {
    fn scale(&self, request: &ScalingRequest) -> Result<ScalingResponse, ScaleError> {
        let mut client = ScalerClient::new(self.channel.clone());
        let msg = ScaleRequest::from(request);
        self.runtime.block_on(async move {
            client
                .scale(Request::new(msg))
                .await
                .map(|resp| resp.into_inner().into())
                .map_err(status_to_error)
        })
    }

    fn describe(&self) -> String {
        format!("remote {}", self.endpoint)
    }
}

// ---------- Server ----------

#[derive(Default)]
pub struct ScalerSvc;

#[tonic::async_trait]
impl Scaler for ScalerSvc {
    async fn scale(
        &self,
        request: Request<ScaleRequest>,
    ) -> Result<Response<ScaleResponse>, Status> {
        let req = ScalingRequest::try_from(request.into_inner())?;
        match scaling::scale(&req) {
            Ok(resp) => Ok(Response::new(resp.into())),
            Err(e) => {
                log::info!("Rejected scaling request: {e}");
                Err(Status::invalid_argument(e.to_string()))
            }
        }
    }

    async fn health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        Ok(Response::new(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }))
    }
}

/// Serve the scaler on `addr` until the process exits.
pub async fn serve(addr: SocketAddr) -> Result<(), tonic::transport::Error> {
    log::info!("Scaling gRPC server listening on {addr}");
    tonic::transport::Server::builder()
        .add_service(ScalerServer::new(ScalerSvc))
        .serve(addr)
        .await
}
