//! Tests for the HTTP dictionary against a local server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use word_link::{DictionaryLookup, HttpDictionary};

/// Serves `200 OK` for words in `known` and `404 Not Found` for anything
/// else. Returns the base URL.
async fn serve_dictionary(known: &'static [&'static str]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has an address");

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or_default();
                let word = path.rsplit('/').next().unwrap_or_default();
                let status = if known.iter().any(|k| *k == word) {
                    "200 OK"
                } else {
                    "404 Not Found"
                };

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    status
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}/api/v2/entries/en/", addr)
}

fn dictionary(base_url: &str) -> HttpDictionary {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build client");
    HttpDictionary::with_client(client, base_url).expect("Valid base URL")
}

#[tokio::test]
async fn test_success_status_means_word_exists() {
    let dict = dictionary(&serve_dictionary(&["cat", "zebu"]).await);

    assert!(dict.lookup("cat").await.expect("Lookup answered"));
    assert!(dict.lookup("zebu").await.expect("Lookup answered"));
}

#[tokio::test]
async fn test_not_found_status_means_no_such_word() {
    let dict = dictionary(&serve_dictionary(&["cat"]).await);

    assert!(!dict.lookup("xyzzyqqq").await.expect("Lookup answered"));
}

#[tokio::test]
async fn test_unreachable_server_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has an address");
    drop(listener);

    let dict = dictionary(&format!("http://{}/api/v2/entries/en/", addr));
    assert!(dict.lookup("cat").await.is_err());
}
