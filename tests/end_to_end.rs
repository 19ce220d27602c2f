use std::{fs, net::SocketAddr, path::Path};

use gwent_scraper::{extract::GatePolicy, Config};
use tempfile::TempDir;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

const HEADER: &str = "id,rank,total wins,current wins,current losses,current draws,MMR,prestige,level";

const PRIVATE_PAGE: &str = r#"<html><body>
<div class="c-profile-private">THIS PLAYER PROFILE IS PRIVATE</div>
<span>9,999 MMR</span>
</body></html>"#;

const FULL_PAGE: &str = r#"<html><head><script>
var profileDataWins = {"overall":1312,"factions":[{"slug":"NR","count":700},{"slug":"SK","count":612}]};
var profileDataCurrent = {"overall":88,"factions":[{"slug":"NR","count":88}]};
</script></head><body>
<div class="l-player-details__rank"><strong>4</strong></div>
<div class="l-player-details__prestige prestige--2"><strong>
      31</strong></div>
<div class="l-player-details__mmr">10,021 MMR</div>
<table>
<tr><td>Losses</td><td>1,203 matches</td></tr>
<tr><td>Draws</td><td>14 matches</td></tr>
</table>
</body></html>"#;

/// Minimal HTTP/1.1 server answering every request with a fixed page per path.
async fn serve(listener: TcpListener) {
    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(respond(stream));
    }
}

async fn respond(mut stream: TcpStream) {
    let mut request = Vec::new();
    let mut chunk = [0; 1024];

    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let path = request.split_whitespace().nth(1).unwrap_or("/");

    let (status, body) = match path {
        "/en/profile/hidden" => ("200 OK", PRIVATE_PAGE),
        "/en/profile/ciri" | "/en/profile/white%20wolf" => ("200 OK", FULL_PAGE),
        _ => ("404 Not Found", "<h1>Not found</h1>"),
    };

    let response = format!(
        "HTTP/1.1 {status}\r\n\
        Content-Type: text/html; charset=utf-8\r\n\
        Content-Length: {}\r\n\
        Connection: close\r\n\r\n{body}",
        body.len()
    );

    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn mock_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener));

    addr
}

fn config(dir: &Path, addr: SocketAddr, players: &str) -> Config {
    let players_path = dir.join("Players.csv");
    fs::write(&players_path, players).unwrap();

    Config {
        players_path,
        output_path: dir.join("Data.csv"),
        concurrency: 2,
        base_url: format!("http://{addr}/en/profile/").into(),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn private_missing_and_full_profile() {
    let addr = mock_server().await;
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), addr, "hidden\nnobody\nciri\n");

    let rows = gwent_scraper::run(&config).await.unwrap();
    assert_eq!(rows, 3);

    let content = fs::read_to_string(&config.output_path).unwrap();
    let lines: Vec<_> = content.lines().collect();

    assert_eq!(
        lines,
        [
            HEADER,
            "hidden,30,0,0,0,0,0,0,0",
            "nobody,30,0,0,0,0,0,0,0",
            "ciri,4,1312,88,1203,14,10021,2,31",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn compatibility_gate_matches_on_full_profile() {
    let addr = mock_server().await;
    let dir = TempDir::new().unwrap();

    let config = Config {
        gate: GatePolicy::MmrMatch,
        ..config(dir.path(), addr, "ciri,extra column\nnobody,ignored\n")
    };

    gwent_scraper::run(&config).await.unwrap();

    let content = fs::read_to_string(&config.output_path).unwrap();
    let lines: Vec<_> = content.lines().collect();

    assert_eq!(
        lines,
        [
            HEADER,
            "ciri,4,1312,88,1203,14,10021,2,31",
            "nobody,30,0,0,0,0,0,0,0",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ids_with_spaces_are_escaped() {
    let addr = mock_server().await;
    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), addr, "white wolf\nsir lambert\n");

    assert_eq!(gwent_scraper::run(&config).await.unwrap(), 2);

    let content = fs::read_to_string(&config.output_path).unwrap();
    let lines: Vec<_> = content.lines().collect();

    assert_eq!(
        lines,
        [
            HEADER,
            "white wolf,4,1312,88,1203,14,10021,2,31",
            "sir lambert,30,0,0,0,0,0,0,0",
        ]
    );
}

#[tokio::test]
async fn connection_failure_aborts_without_output() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let config = config(dir.path(), addr, "ciri\n");

    assert!(gwent_scraper::run(&config).await.is_err());
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn missing_player_table_aborts() {
    let addr = mock_server().await;
    let dir = TempDir::new().unwrap();

    let config = Config {
        players_path: dir.path().join("missing.csv"),
        ..config(dir.path(), addr, "")
    };

    assert!(gwent_scraper::run(&config).await.is_err());
    assert!(!config.output_path.exists());
}
