use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_RESPONSE: &str = r#"{
    "original_text": "Hello world. How are you?",
    "original_text_analysis": {
        "words_count": 2,
        "words_info": [
            {"word": "hello", "freq": 1, "gram_info": "междометие"},
            {"word": "world", "freq": 1, "gram_info": "существительное в единственном числе"}
        ]
    },
    "translated_text": "Bonjour le monde. Comment allez-vous ?",
    "translated_text_analysis": {
        "words_count": 2,
        "words_info": [
            {"word": "bonjour", "freq": 1, "gram_info": "междометие"},
            {"word": "monde", "freq": 1, "gram_info": "существительное"}
        ]
    }
}"#;

fn translens(config_dir: &Path) -> Command {
    let config = config_dir.join("config.toml");
    fs::write(&config, "").unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_translens"));
    cmd.arg("--config").arg(config);
    cmd
}

/// 只应答一次的本地服务，返回 base_url
fn serve_once(content_type: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        drain_request(&mut reader);

        let mut stream = stream;
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            content_type,
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
    });

    format!("http://{}", addr)
}

/// 读完请求头和请求体（Content-Length 或 chunked）
fn drain_request(reader: &mut impl BufRead) {
    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap();
            } else if name.eq_ignore_ascii_case("transfer-encoding") {
                chunked = value.trim().eq_ignore_ascii_case("chunked");
            }
        }
    }

    if !chunked {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        return;
    }
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).unwrap();
        let size = usize::from_str_radix(size_line.trim(), 16).unwrap();
        let mut chunk = vec![0u8; size + 2];
        reader.read_exact(&mut chunk).unwrap();
        if size == 0 {
            break;
        }
    }
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[test]
fn split_prints_one_sentence_per_line() {
    let dir = tempfile::tempdir().unwrap();
    translens(dir.path())
        .args(["split", "Hello world. How are you? Fine!"])
        .assert()
        .success()
        .stdout("Hello world.\nHow are you?\nFine!\n");
}

#[test]
fn split_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    translens(dir.path())
        .arg("split")
        .write_stdin("One. Two!")
        .assert()
        .success()
        .stdout("One.\nTwo!\n");
}

#[test]
fn analyze_prints_tables_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let server = serve_once("application/json", SAMPLE_RESPONSE.as_bytes().to_vec());

    translens(dir.path())
        .args(["analyze", "Hello world. How are you?", "--export"])
        .arg("--server")
        .arg(&server)
        .arg("--export-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Bonjour le monde."))
        .stdout(predicate::str::contains("monde"))
        .stdout(predicate::str::contains("translation_results.txt"));

    let report = fs::read_to_string(dir.path().join("translation_results.txt")).unwrap();
    assert!(report.contains("hello"));
    assert!(report.contains("bonjour"));
}

#[test]
fn analyze_fails_when_service_is_down() {
    let dir = tempfile::tempdir().unwrap();
    translens(dir.path())
        .args(["analyze", "Hello.", "--export"])
        .arg("--server")
        .arg(closed_port_url())
        .arg("--export-dir")
        .arg(dir.path())
        .assert()
        .failure();

    assert!(!dir.path().join("translation_results.txt").exists());
}

#[test]
fn tree_writes_png_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut png = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&640u32.to_be_bytes());
    png.extend_from_slice(&200u32.to_be_bytes());
    let server = serve_once("image/png", png.clone());
    let out = dir.path().join("tree.png");

    translens(dir.path())
        .args(["tree", "Hello world."])
        .arg("--out")
        .arg(&out)
        .arg("--server")
        .arg(&server)
        .assert()
        .success()
        .stdout(predicate::str::contains("640x200"));

    assert_eq!(fs::read(out).unwrap(), png);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_translens"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["split", "Hi."])
        .assert()
        .failure();
}
