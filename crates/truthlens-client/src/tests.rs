//! HTTP behaviour tests against an in-process mock of the analysis service

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::mpsc;

    use crate::{
        AnalysisClient, ApiConfig, BiasLabel, ContentAnalyzer, Environment, Error, HealthProbe,
        HealthProber, ProbeFailure, RemoteError,
    };

    struct Recorded {
        method: String,
        path: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Recorded {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }

        fn input_text(&self) -> String {
            serde_json::from_str::<serde_json::Value>(&self.body)
                .ok()
                .and_then(|body| body["input_text"].as_str().map(str::to_string))
                .unwrap_or_default()
        }
    }

    struct Reply {
        status: u16,
        body: String,
        delay: Duration,
    }

    impl Reply {
        fn json(status: u16, body: impl Into<String>) -> Self {
            Self {
                status,
                body: body.into(),
                delay: Duration::ZERO,
            }
        }

        fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    type Responder = Arc<dyn Fn(&Recorded) -> Reply + Send + Sync>;

    struct MockService {
        base_url: String,
        requests: mpsc::UnboundedReceiver<Recorded>,
        aborted: mpsc::UnboundedReceiver<()>,
    }

    impl MockService {
        async fn start<F>(respond: F) -> Self
        where
            F: Fn(&Recorded) -> Reply + Send + Sync + 'static,
        {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (request_tx, requests) = mpsc::unbounded_channel();
            let (abort_tx, aborted) = mpsc::unbounded_channel();
            let respond: Responder = Arc::new(respond);

            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let respond = respond.clone();
                    let request_tx = request_tx.clone();
                    let abort_tx = abort_tx.clone();
                    tokio::spawn(serve_connection(stream, respond, request_tx, abort_tx));
                }
            });

            Self {
                base_url: format!("http://{}", addr),
                requests,
                aborted,
            }
        }

        fn config(&self) -> ApiConfig {
            ApiConfig::resolve(Environment::Development, Some(&self.base_url))
        }
    }

    async fn serve_connection(
        mut stream: TcpStream,
        respond: Responder,
        request_tx: mpsc::UnboundedSender<Recorded>,
        abort_tx: mpsc::UnboundedSender<()>,
    ) {
        let Some(request) = read_request(&mut stream).await else {
            return;
        };
        let reply = (*respond)(&request);
        let _ = request_tx.send(request);

        if !reply.delay.is_zero() {
            let mut byte = [0u8; 1];
            tokio::select! {
                _ = tokio::time::sleep(reply.delay) => {}
                read = stream.read(&mut byte) => {
                    if matches!(read, Ok(0) | Err(_)) {
                        let _ = abort_tx.send(());
                    }
                    return;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            reply.status,
            reply.body.len(),
            reply.body
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    async fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let mut request_line = lines.next()?.split_whitespace();
        let method = request_line.next()?.to_string();
        let path = request_line.next()?.to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
            .collect();

        let content_length = headers
            .iter()
            .find(|(key, _)| key == "content-length")
            .and_then(|(_, value)| value.parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

        Some(Recorded {
            method,
            path,
            headers,
            body,
        })
    }

    fn verdict_json(score: u32, bias: &str, tone: &str, recommendation: &str) -> String {
        serde_json::json!({
            "factual_accuracy": score,
            "bias": bias,
            "emotional_tone": tone,
            "recommendation": recommendation,
        })
        .to_string()
    }

    /// Address nothing listens on
    async fn refused_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn probe_reports_healthy_service() {
        let mut service = MockService::start(|_| Reply::json(200, r#"{"status":"ok"}"#)).await;
        let prober = HealthProber::new(service.config()).unwrap();

        assert!(prober.probe().await);

        let request = service.requests.recv().await.unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/api/v1/health");
        assert_eq!(request.header("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn probe_treats_server_error_as_unhealthy() {
        let service = MockService::start(|_| Reply::json(500, r#"{"detail":"boom"}"#)).await;
        let prober = HealthProber::new(service.config()).unwrap();

        assert!(!prober.probe().await);
        assert_eq!(prober.check().await, Err(ProbeFailure::Unhealthy(500)));
    }

    #[tokio::test]
    async fn probe_treats_connection_error_as_unhealthy() {
        let base = refused_base_url().await;
        let config = ApiConfig::resolve(Environment::Development, Some(&base));
        let prober = HealthProber::new(config).unwrap();

        assert!(!prober.probe().await);
        assert!(matches!(prober.check().await, Err(ProbeFailure::Unreachable(_))));
    }

    #[tokio::test]
    async fn probe_gives_up_at_deadline_and_aborts_request() {
        let mut service = MockService::start(|_| {
            Reply::json(200, r#"{"status":"ok"}"#).after(Duration::from_secs(10))
        })
        .await;
        let deadline = Duration::from_millis(200);
        let prober = HealthProber::new(service.config().with_health_timeout(deadline)).unwrap();

        let started = Instant::now();
        assert_eq!(prober.check().await, Err(ProbeFailure::TimedOut(deadline)));
        assert!(started.elapsed() < Duration::from_secs(5));

        let aborted = tokio::time::timeout(Duration::from_secs(5), service.aborted.recv()).await;
        assert_eq!(aborted, Ok(Some(())));
    }

    #[tokio::test]
    async fn probes_are_independent() {
        let service = MockService::start(|_| Reply::json(200, "{}")).await;
        let prober = HealthProber::new(service.config().with_health_timeout(Duration::from_secs(1))).unwrap();

        for _ in 0..3 {
            assert!(prober.probe().await);
        }
    }

    #[tokio::test]
    async fn analyze_maps_response_and_updates_latest() {
        let mut service = MockService::start(|_| {
            Reply::json(200, verdict_json(82, "neutral", "Neutral", "Well-argued..."))
        })
        .await;
        let client = AnalysisClient::new(service.config()).unwrap();

        let result = client.analyze("some text").await.unwrap();

        assert_eq!(result.factual_accuracy, 82.0);
        assert_eq!(result.bias, BiasLabel::Neutral);
        assert_eq!(result.emotional_level, "Neutral");
        assert_eq!(result.recommendation, "Well-argued...");
        assert_eq!(client.latest(), Some(result));

        let request = service.requests.recv().await.unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/v1/analyze");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&request.body).unwrap(),
            serde_json::json!({ "input_text": "some text" })
        );
    }

    #[tokio::test]
    async fn server_error_leaves_latest_untouched() {
        let service = MockService::start(|request| match request.input_text().as_str() {
            "fail" => Reply::json(500, r#"{"detail":"model unavailable"}"#),
            _ => Reply::json(200, verdict_json(75, "left", "Slightly emotional", "Consider checking additional sources")),
        })
        .await;

        let fresh = AnalysisClient::new(service.config()).unwrap();
        let err = fresh.analyze("fail").await.unwrap_err();
        assert!(matches!(err, Error::Remote(RemoteError::Status { status: 500, .. })));
        assert_eq!(fresh.latest(), None);

        let client = AnalysisClient::new(service.config()).unwrap();
        let first = client.analyze("ok").await.unwrap();
        assert!(client.analyze("fail").await.is_err());
        assert_eq!(client.latest(), Some(first));
    }

    #[tokio::test]
    async fn malformed_body_is_a_remote_error() {
        let service = MockService::start(|request| match request.input_text().as_str() {
            "garbage" => Reply::json(200, "<html>not json</html>"),
            "partial" => Reply::json(200, r#"{"factual_accuracy": 90, "bias": "left"}"#),
            _ => Reply::json(200, verdict_json(60, "right", "Alarmist", "Recommended to verify claims independently")),
        })
        .await;
        let client = AnalysisClient::new(service.config()).unwrap();
        let good = client.analyze("fine").await.unwrap();

        for input in ["garbage", "partial"] {
            let err = client.analyze(input).await.unwrap_err();
            assert!(matches!(err, Error::Remote(RemoteError::Malformed(_))), "{input}: {err}");
        }
        assert_eq!(client.latest(), Some(good));
    }

    #[tokio::test]
    async fn connection_failure_is_a_remote_error() {
        let base = refused_base_url().await;
        let client = AnalysisClient::new(ApiConfig::resolve(Environment::Development, Some(&base))).unwrap();

        let err = client.analyze("anything").await.unwrap_err();
        assert!(matches!(err, Error::Remote(RemoteError::Network(_))));
        assert_eq!(client.latest(), None);
    }

    #[tokio::test]
    async fn latest_holds_last_resolved_not_last_issued() {
        let service = MockService::start(|request| match request.input_text().as_str() {
            "slow" => Reply::json(200, verdict_json(10, "right", "Highly emotional", "slow"))
                .after(Duration::from_millis(400)),
            _ => Reply::json(200, verdict_json(90, "left", "Neutral", "fast"))
                .after(Duration::from_millis(50)),
        })
        .await;
        let client = AnalysisClient::new(service.config()).unwrap();

        let (slow, fast) = tokio::join!(client.analyze("slow"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            client.analyze("fast").await
        });

        let slow = slow.unwrap();
        assert_eq!(fast.unwrap().recommendation, "fast");
        assert_eq!(slow.recommendation, "slow");
        assert_eq!(client.latest(), Some(slow));
    }

    #[tokio::test]
    async fn identical_requests_may_differ() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let service = MockService::start(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Reply::json(200, verdict_json(70 + n, "neutral", "Neutral", "Well-argued and balanced perspective"))
        })
        .await;
        let client = AnalysisClient::new(service.config()).unwrap();

        let first = client.analyze("x").await.unwrap();
        let second = client.analyze("x").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(client.latest(), Some(second));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn analysis_is_unbounded_by_default() {
        let service = MockService::start(|_| {
            Reply::json(200, verdict_json(88, "neutral", "Neutral", "ok")).after(Duration::from_millis(300))
        })
        .await;
        let config = service.config().with_health_timeout(Duration::from_millis(50));
        let client = AnalysisClient::new(config).unwrap();

        assert!(client.analyze("takes a while").await.is_ok());
    }

    #[tokio::test]
    async fn optional_analysis_deadline() {
        let service = MockService::start(|_| {
            Reply::json(200, verdict_json(88, "neutral", "Neutral", "late")).after(Duration::from_secs(10))
        })
        .await;
        let deadline = Duration::from_millis(100);
        let client = AnalysisClient::new(service.config().with_analysis_timeout(deadline)).unwrap();

        let err = client.analyze("slow").await.unwrap_err();
        assert!(matches!(err, Error::Remote(RemoteError::TimedOut(d)) if d == deadline));
        assert_eq!(client.latest(), None);
    }
}
