//! HTTP健康探测器实现
//!
//! 对单个端点发起一次HTTP请求，将响应状态码、耗时或传输失败
//! 归约为UP/DOWN判定

use crate::config::EndpointSpec;
use crate::error::ProbeError;
use crate::health::verdict::{classify, HealthVerdict};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// 健康探测器trait，定义探测接口
#[async_trait]
pub trait Prober: Send + Sync {
    /// 执行单次健康探测
    ///
    /// 每次调用发出一个请求并产生一个判定，探测器内部不做重试。
    /// 任何传输层失败（连接拒绝、DNS失败、超时、TLS错误）在本地
    /// 归约为Down，不会作为错误向调用方传播。
    ///
    /// # 参数
    /// * `endpoint` - 端点配置
    ///
    /// # 返回
    /// * `HealthVerdict` - 判定结果
    async fn probe(&self, endpoint: &EndpointSpec) -> HealthVerdict;
}

/// HTTP健康探测器实现
pub struct HttpProber {
    /// HTTP客户端
    client: Client,
}

impl HttpProber {
    /// 创建新的HTTP健康探测器
    ///
    /// # 参数
    /// * `timeout` - 请求超时时间，超时作为传输失败归约为Down
    ///
    /// # 返回
    /// * `Result<Self, ProbeError>` - 探测器实例
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()?;

        Ok(Self { client })
    }

    /// 构建HTTP请求
    ///
    /// 配置验证保证方法合法，无法解析时返回None由调用方判定为Down。
    fn build_request(&self, endpoint: &EndpointSpec) -> Option<reqwest::RequestBuilder> {
        let method = Method::from_str(&endpoint.method.to_uppercase()).ok()?;

        let mut request = self.client.request(method, &endpoint.url);

        // 添加请求头
        for (key, value) in &endpoint.headers {
            request = request.header(key, value);
        }

        // 添加请求体（如果有）
        if let Some(body) = &endpoint.body {
            request = request.json(body);
        }

        Some(request)
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, endpoint: &EndpointSpec) -> HealthVerdict {
        let Some(request) = self.build_request(endpoint) else {
            debug!("无效的HTTP方法: {}", endpoint.method);
            return HealthVerdict::Down;
        };

        let start_time = Instant::now();
        let response = request.send().await;
        let latency_ms = round_millis(start_time.elapsed());

        match response {
            Ok(response) => {
                let status_code = response.status().as_u16();
                debug!("Response: {} status code", status_code);
                debug!("Latency: {} ms", latency_ms);
                classify(status_code, latency_ms)
            }
            Err(e) => {
                debug!("Request failed: {} ({} ms)", e, latency_ms);
                HealthVerdict::Down
            }
        }
    }
}

/// 将耗时换算为四舍五入的毫秒数
fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_endpoint(url: &str) -> EndpointSpec {
        EndpointSpec {
            url: url.to_string(),
            method: "GET".to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[test]
    fn test_http_prober_creation() {
        let prober = HttpProber::new(Duration::from_secs(10));
        assert!(prober.is_ok());
    }

    #[test]
    fn test_round_millis() {
        assert_eq!(round_millis(Duration::from_millis(300)), 300);
        assert_eq!(round_millis(Duration::from_micros(499_600)), 500);
        assert_eq!(round_millis(Duration::from_micros(499_400)), 499);
    }

    #[tokio::test]
    async fn test_probe_up_on_2xx() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .create_async()
            .await;

        let prober = HttpProber::new(Duration::from_secs(10)).unwrap();
        let endpoint = create_test_endpoint(&format!("{}/health", server.url()));

        let verdict = prober.probe(&endpoint).await;

        assert_eq!(verdict, HealthVerdict::Up);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_down_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(500)
            .create_async()
            .await;

        let prober = HttpProber::new(Duration::from_secs(10)).unwrap();
        let endpoint = create_test_endpoint(&format!("{}/health", server.url()));

        assert_eq!(prober.probe(&endpoint).await, HealthVerdict::Down);
    }

    #[tokio::test]
    async fn test_probe_down_on_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let prober = HttpProber::new(Duration::from_secs(10)).unwrap();
        let endpoint = create_test_endpoint(&format!("{}/missing", server.url()));

        assert_eq!(prober.probe(&endpoint).await, HealthVerdict::Down);
    }

    #[tokio::test]
    async fn test_probe_down_on_connection_refused() {
        // 未监听的端口，传输失败归约为Down而不是错误
        let prober = HttpProber::new(Duration::from_secs(1)).unwrap();
        let endpoint = create_test_endpoint("http://127.0.0.1:9/health");

        assert_eq!(prober.probe(&endpoint).await, HealthVerdict::Down);
    }

    #[tokio::test]
    async fn test_probe_post_with_headers_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/submit")
            .match_header("x-probe-token", "secret")
            .match_header("content-type", "application/json")
            .with_status(201)
            .create_async()
            .await;

        let mut headers = HashMap::new();
        headers.insert("x-probe-token".to_string(), "secret".to_string());

        let endpoint = EndpointSpec {
            url: format!("{}/submit", server.url()),
            method: "POST".to_string(),
            headers,
            body: Some(serde_json::json!({"probe": "deep"})),
        };

        let prober = HttpProber::new(Duration::from_secs(10)).unwrap();

        assert_eq!(prober.probe(&endpoint).await, HealthVerdict::Up);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_down_on_invalid_method() {
        let prober = HttpProber::new(Duration::from_secs(1)).unwrap();
        let mut endpoint = create_test_endpoint("http://127.0.0.1:9/health");
        endpoint.method = "NOT A METHOD".to_string();

        assert_eq!(prober.probe(&endpoint).await, HealthVerdict::Down);
    }
}
