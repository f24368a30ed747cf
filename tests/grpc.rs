#![cfg(feature = "grpc")]

use axis_scaler::grpc::proto::v1::{ScaleRequest, ScaleResponse};
use axis_scaler::*;

#[test]
fn request_converts_to_proto_and_back() {
    let ranges = AxisRanges::new(("0", "10"), ("0", "100"), ("0", "255"));
    let req = ScalingRequest::new(&AxisValues::new("", "", "7f"), &ranges, Axis::Z, true);
    let msg = ScaleRequest::from(&req);
    assert_eq!(msg.scale_from, "z");
    assert!(msg.z_in_hex);
    assert_eq!(ScalingRequest::try_from(msg).unwrap(), req);
}

#[test]
fn unknown_axis_is_invalid_argument() {
    let msg = ScaleRequest {
        scale_from: "w".to_string(),
        ..Default::default()
    };
    let status = ScalingRequest::try_from(msg).unwrap_err();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
}

#[test]
fn response_converts_from_proto() {
    let msg = ScaleResponse {
        x: "1".into(),
        y: "2".into(),
        z: "3".into(),
    };
    let resp: ScalingResponse = msg.into();
    assert_eq!(resp.z, "3");
}

#[test]
fn bad_endpoint_is_a_transport_error() {
    let err = axis_scaler::grpc::RemoteScaler::new("not a uri with spaces").err().unwrap();
    assert!(matches!(err, ScaleError::Transport(_)));
}

mod server {
    use axis_scaler::grpc::proto::v1::scaler_server::Scaler;
    use axis_scaler::grpc::proto::v1::{HealthRequest, ScaleRequest};
    use axis_scaler::grpc::{status_to_error, RemoteScaler, ScalerSvc, SERVICE_NAME};
    use axis_scaler::*;
    use tonic::{Code, Request, Status};

    fn wire_request(ranges: &AxisRanges, from: Axis, value: &str) -> ScaleRequest {
        let mut values = AxisValues::default();
        values.set(from, value);
        ScaleRequest::from(&ScalingRequest::new(&values, ranges, from, false))
    }

    #[tokio::test]
    async fn server_scales_valid_request() {
        let ranges = AxisRanges::new(("0", "10"), ("0", "100"), ("0", "255"));
        let resp = ScalerSvc
            .scale(Request::new(wire_request(&ranges, Axis::X, "5")))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.y, "50");
        assert_eq!(resp.z, "127.5");
    }

    #[tokio::test]
    async fn zero_width_range_is_rejected_over_the_wire() {
        let ranges = AxisRanges::new(("5", "5"), ("0", "100"), ("0", "255"));
        let status = ScalerSvc
            .scale(Request::new(wire_request(&ranges, Axis::X, "5")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("cannot be zero"));

        let err = status_to_error(status);
        assert!(matches!(err, ScaleError::Rejected(ref m) if m.contains("cannot be zero")));
    }

    #[tokio::test]
    async fn health_reports_service() {
        let resp = ScalerSvc
            .health(Request::new(HealthRequest {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.service, SERVICE_NAME);
        assert!(!resp.version.is_empty());
    }

    #[test]
    fn non_argument_status_is_transport_failure() {
        let err = status_to_error(Status::unavailable("connection refused"));
        assert!(matches!(err, ScaleError::Transport(_)));
        let err = status_to_error(Status::failed_precondition("bad ranges"));
        assert_eq!(err, ScaleError::Rejected("bad ranges".to_string()));
    }

    #[test]
    fn unreachable_server_fails_health_check() {
        // nothing listens on port 1
        let remote = RemoteScaler::new("http://127.0.0.1:1").unwrap();
        assert!(matches!(remote.health(), Err(ScaleError::Transport(_))));
        let err = remote.scale(&ScalingRequest::default()).unwrap_err();
        assert!(matches!(err, ScaleError::Transport(_)));
    }
}
