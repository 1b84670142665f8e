use anyhow::Result;
use book_report::core::{Delivery, Pipeline};
use book_report::{LocalStorage, ReportError, ReportPipeline, TomlConfig};
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

const ASCII_REPORT: &str = "--------- Book Report ---------\n\
    Number of books: 2\n\
    Most expensive book: Dear Book ($30.00)\n\
    Link: http://shop.test/dear\n\
    Cheapest book: Cheap Book ($10.00)\n\
    Link: http://shop.test/cheap\n\
    Total value of books: $40.00\n\
    Average price: $20.00\n";

/// 只接受一封信的極簡 SMTP 伺服器，回傳 DATA 區段
async fn one_shot_smtp(listener: TcpListener) -> Result<String> {
    let (socket, _) = listener.accept().await?;
    let (read_half, mut write_half) = socket.into_split();
    let mut reader = BufReader::new(read_half);

    write_half.write_all(b"220 test.relay ESMTP\r\n").await?;

    let mut data = String::new();
    let mut in_data = false;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        if in_data {
            if line == ".\r\n" {
                in_data = false;
                write_half.write_all(b"250 2.0.0 queued\r\n").await?;
            } else {
                data.push_str(&line);
            }
            continue;
        }

        let command = line.trim_end().to_ascii_uppercase();
        if command.starts_with("EHLO") || command.starts_with("HELO") {
            write_half.write_all(b"250 test.relay\r\n").await?;
        } else if command.starts_with("DATA") {
            in_data = true;
            write_half.write_all(b"354 end with <CRLF>.<CRLF>\r\n").await?;
        } else if command.starts_with("QUIT") {
            write_half.write_all(b"221 bye\r\n").await?;
            break;
        } else {
            write_half.write_all(b"250 ok\r\n").await?;
        }
    }

    Ok(data)
}

fn config_for(output_dir: &str, port: u16) -> TomlConfig {
    let mut config = TomlConfig::default();
    config.files.output_dir = output_dir.to_string();
    config.smtp.host = "127.0.0.1".to_string();
    config.smtp.port = port;
    config
}

#[tokio::test]
async fn test_report_is_delivered_as_plain_text_body() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("report.txt"), ASCII_REPORT)?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let relay = tokio::spawn(one_shot_smtp(listener));

    let pipeline = ReportPipeline::new(
        LocalStorage::new(output_dir.clone()),
        config_for(&output_dir, port),
    );
    let delivery = pipeline.notify().await?;
    assert_eq!(delivery, Delivery::Sent);

    let data = relay.await??;
    let (headers, body) = data
        .split_once("\r\n\r\n")
        .expect("message has a header/body separator");

    assert!(headers.contains("From: reports@automation.example"));
    assert!(headers.contains("To: recipient@example.com"));
    assert!(headers.contains("Content-Type: text/plain"));

    // SMTP 線路上一律 CRLF，還原後比對內容
    let body = body.replace("\r\n", "\n");
    assert_eq!(body.trim_end(), ASCII_REPORT.trim_end());

    Ok(())
}

#[tokio::test]
async fn test_refused_connection_is_reported_not_raised() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("report.txt"), ASCII_REPORT)?;

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    let pipeline = ReportPipeline::new(
        LocalStorage::new(output_dir.clone()),
        config_for(&output_dir, port),
    );

    match pipeline.notify().await? {
        Delivery::RelayUnavailable { relay } => assert_eq!(relay, format!("127.0.0.1:{}", port)),
        Delivery::Sent => panic!("nothing was listening on port {}", port),
    }

    Ok(())
}

#[tokio::test]
async fn test_relay_rejection_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("report.txt"), ASCII_REPORT)?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    // 打招呼後直接拒收寄件者
    let relay = tokio::spawn(async move {
        let (socket, _) = listener.accept().await?;
        let (read_half, mut write_half) = socket.into_split();
        let mut reader = BufReader::new(read_half);
        write_half.write_all(b"220 test.relay ESMTP\r\n").await?;

        let mut line = String::new();
        while reader.read_line(&mut line).await? > 0 {
            let command = line.trim_end().to_ascii_uppercase();
            if command.starts_with("EHLO") {
                write_half.write_all(b"250 test.relay\r\n").await?;
            } else if command.starts_with("QUIT") {
                write_half.write_all(b"221 bye\r\n").await?;
                break;
            } else {
                write_half.write_all(b"550 5.7.1 relaying denied\r\n").await?;
            }
            line.clear();
        }
        Ok::<_, std::io::Error>(())
    });

    let pipeline = ReportPipeline::new(
        LocalStorage::new(output_dir.clone()),
        config_for(&output_dir, port),
    );

    let err = pipeline.notify().await.unwrap_err();
    assert!(matches!(err, ReportError::Smtp(_)));

    relay.abort();
    Ok(())
}

#[tokio::test]
async fn test_missing_report_file_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();

    let pipeline = ReportPipeline::new(
        LocalStorage::new(output_dir.clone()),
        config_for(&output_dir, 25),
    );

    assert!(matches!(pipeline.notify().await, Err(ReportError::Io(_))));
    Ok(())
}

#[tokio::test]
async fn test_non_utf8_report_is_encoding_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().to_str().unwrap().to_string();
    std::fs::write(temp_dir.path().join("report.txt"), [b'o', b'k', 0xff, 0xfe])?;

    let pipeline = ReportPipeline::new(
        LocalStorage::new(output_dir.clone()),
        config_for(&output_dir, 25),
    );

    match pipeline.notify().await {
        Err(ReportError::Encoding { path }) => assert_eq!(path, "report.txt"),
        other => panic!("expected Encoding error, got {:?}", other),
    }
    Ok(())
}
