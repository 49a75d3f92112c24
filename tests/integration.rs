use folder_report::output::{OutputFormat, format_response};
use folder_report::{ReportBuilder, ReportClient, ReportConfig, ReportError, analyze_folder};
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::tempdir;

struct Captured {
    head: String,
    body: Vec<u8>,
}

/// Serves one request with `reply` and returns what the client sent.
fn one_shot_server(reply: &'static str) -> (String, thread::JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/v1/analyse", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
        let length: usize = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse().unwrap())
            })
            .unwrap_or(0);
        while buf.len() < header_end + length {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            reply.len(),
            reply
        );
        stream.write_all(response.as_bytes()).unwrap();
        Captured {
            head,
            body: buf[header_end..header_end + length].to_vec(),
        }
    });
    (url, handle)
}

fn client(url: &str) -> ReportClient {
    let config = ReportConfig::new(url, "sk-test").unwrap();
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    ReportClient::with_client(config, http)
}

#[test]
fn integration_full_flow() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("service.log"), "GET /health 200").unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/report.csv"), "a,b\n1,2\n").unwrap();
    let record = analyze_folder(&ReportBuilder::new(dir.path()).build()).unwrap();
    assert_eq!(record.total_files, 2);

    let (url, server) = one_shot_server(
        r#"{"files":[{"path":"/srv/service.log","size_mb":0.01},{"path":"/srv/data/report.csv","size_mb":0.02}]}"#,
    );
    let response = client(&url).send(&record).unwrap();
    let captured = server.join().unwrap();

    let head = captured.head.to_ascii_lowercase();
    assert!(head.starts_with("post /v1/analyse "));
    assert!(head.contains("authorization: bearer sk-test"));
    assert!(head.contains("content-type: application/json"));
    let sent: folder_report::FolderRecord = serde_json::from_slice(&captured.body).unwrap();
    assert_eq!(sent, record);

    let text = format_response(response.as_ref(), OutputFormat::Text).unwrap();
    assert_eq!(
        text,
        "File: /srv/service.log - Size: 0.01 MB\nFile: /srv/data/report.csv - Size: 0.02 MB\n"
    );
}

#[test]
fn integration_malformed_reply_is_none() {
    let (url, server) = one_shot_server("not json");
    let response = client(&url)
        .send(&folder_report::FolderRecord::new("empty"))
        .unwrap();
    server.join().unwrap();
    assert!(response.is_none());
}

#[test]
fn integration_connection_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/v1/analyse", port);
    let result = client(&url).send(&folder_report::FolderRecord::new("empty"));
    let err = result.unwrap_err();
    assert!(matches!(err, ReportError::Transport(_)));
    assert!(err.to_string().starts_with("Transport error:"));

    assert_eq!(format_response(None, OutputFormat::Json).unwrap(), "null");
    assert!(matches!(
        format_response(None, OutputFormat::Text),
        Err(ReportError::MissingFiles)
    ));
}
