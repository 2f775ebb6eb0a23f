//! Handler-level tests over a synthetic chunk source

use bytes::Bytes;
use evreg::{
    BytesChunkSource, DataTarget, DatasetConfig, Error, StatsRequest, StatsResponse, parse_request,
    process,
};

const DOC: &str = concat!(
    r#"{"meta":{"view":{"columns":[{"name":"Make"},"#,
    r#"{"name":"Electric Vehicle Type"},{"name":"Electric Range"}]}},"#,
    r#""data":[["TESLA","Battery Electric Vehicle (BEV)","200"],"#,
    r#"["TESLA","Battery Electric Vehicle (BEV)","220"],"#,
    r#"["NISSAN","Battery Electric Vehicle (BEV)","150"]]}"#
);

fn source() -> BytesChunkSource {
    BytesChunkSource::split(DOC.as_bytes(), 32)
}

#[tokio::test]
async fn count_request_returns_mapping() {
    let request = StatsRequest::count();
    let response = process(&request, &DatasetConfig::default(), source())
        .await
        .expect("clean run");
    match response {
        StatsResponse::Count(counts) => {
            assert_eq!(counts["TESLA"], 2);
            assert_eq!(counts["NISSAN"], 1);
        }
        other => panic!("expected count mapping, got {other:?}"),
    }
}

#[tokio::test]
async fn avg_request_returns_single_number() {
    let request = StatsRequest::avg_autonomy("TESLA");
    let response = process(&request, &DatasetConfig::default(), source())
        .await
        .expect("clean run");
    assert_eq!(response, StatsResponse::Average(210.0));
}

#[tokio::test]
async fn missing_maker_fails_before_the_source_is_touched() {
    // A source that would fail immediately: validation must reject first.
    let failing = BytesChunkSource::new(Vec::new())
        .failing_with(Error::transport_msg("must never be polled"));
    let request = StatsRequest { target: DataTarget::AvgAutonomy, maker: None };
    let err = process(&request, &DatasetConfig::default(), failing)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RequestValidation(_)));
}

#[tokio::test]
async fn parse_then_process_round_trip() {
    let request = parse_request(r#"{"target":"avg_autonomy","maker":"NISSAN"}"#).expect("valid");
    let response = process(&request, &DatasetConfig::default(), source())
        .await
        .expect("clean run");
    assert_eq!(response, StatsResponse::Average(150.0));
}

#[tokio::test]
async fn single_byte_chunks_reach_the_same_answer() {
    let request = StatsRequest::count();
    let trickle = BytesChunkSource::new(
        DOC.as_bytes().iter().map(|&b| Bytes::copy_from_slice(&[b])).collect(),
    );
    let response = process(&request, &DatasetConfig::default(), trickle)
        .await
        .expect("clean run");
    match response {
        StatsResponse::Count(counts) => assert_eq!(counts.values().sum::<u64>(), 3),
        other => panic!("expected count mapping, got {other:?}"),
    }
}
