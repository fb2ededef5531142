//! Dev server integration tests — raw TCP requests against a bound server.
//!
//! Each test binds an ephemeral port, so tests run in parallel without
//! clashing. Content files are fake bytes; the scanner includes them by
//! extension alone, which is all the routing layer cares about.

use imgbed::config::Config;
use imgbed::scan;
use imgbed::serve::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use tempfile::TempDir;

fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let website = tmp.path().join("website");
    fs::create_dir_all(website.join("Genshin")).unwrap();
    fs::write(website.join("a.png"), b"fake png").unwrap();
    fs::write(website.join("Genshin").join("b.jpg"), b"fake jpg").unwrap();
    fs::write(website.join("Genshin").join("c.jpg"), b"fake jpg").unwrap();
    tmp
}

fn start_server(project: &TempDir) -> SocketAddr {
    let config = Config::default();
    let inventory = scan::scan(&project.path().join("website"), "website").unwrap();
    let server = Server::bind(project.path(), &config, inventory, 0).unwrap();
    server.spawn().unwrap()
}

fn get(addr: SocketAddr, target: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", addr.port())).unwrap();
    write!(
        stream,
        "GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn random_redirects_into_content_root() {
    let project = setup_project();
    let addr = start_server(&project);

    let response = get(addr, "/random");
    assert!(response.starts_with("HTTP/1.1 302"), "{response}");
    assert!(response.contains("Location: /website/"), "{response}");
}

#[test]
fn random_with_folder_only_picks_from_that_folder() {
    let project = setup_project();
    let addr = start_server(&project);

    for _ in 0..16 {
        let response = get(addr, "/random?folder=Genshin");
        assert!(response.starts_with("HTTP/1.1 302"), "{response}");
        assert!(response.contains("Location: /website/Genshin/"), "{response}");
    }
}

#[test]
fn random_with_unknown_folder_is_404_json() {
    let project = setup_project();
    let addr = start_server(&project);

    let response = get(addr, "/random?folder=Nope");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    assert!(response.contains("application/json"), "{response}");
    assert!(response.contains("\"error\""), "{response}");
}

#[test]
fn random_on_empty_content_root_is_404() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("website")).unwrap();
    let addr = start_server(&tmp);

    let response = get(addr, "/random");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    assert!(response.contains("no images found"), "{response}");
}

#[test]
fn rescan_picks_up_new_files() {
    let project = setup_project();
    let addr = start_server(&project);

    let response = get(addr, "/rescan");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("\"images\":3"), "{response}");

    fs::write(project.path().join("website/d.png"), b"fake png").unwrap();
    let response = get(addr, "/rescan");
    assert!(response.contains("\"images\":4"), "{response}");

    // The new file is now part of the in-memory pool.
    let mut saw_new = false;
    for _ in 0..64 {
        if get(addr, "/random").contains("Location: /website/d.png") {
            saw_new = true;
            break;
        }
    }
    assert!(saw_new, "rescan did not refresh the random pool");
}

#[test]
fn static_file_served_with_content_type() {
    let project = setup_project();
    let addr = start_server(&project);

    let response = get(addr, "/website/a.png");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("Content-Type: image/png"), "{response}");
    assert!(response.ends_with("fake png"), "{response}");
}

#[test]
fn root_serves_generated_index() {
    let project = setup_project();
    fs::write(project.path().join("index.html"), "<html>gallery</html>").unwrap();
    let addr = start_server(&project);

    let response = get(addr, "/");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("text/html"), "{response}");
    assert!(response.contains("gallery"), "{response}");
}

#[test]
fn missing_file_is_404() {
    let project = setup_project();
    let addr = start_server(&project);

    let response = get(addr, "/website/missing.png");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
}

#[test]
fn parent_traversal_is_rejected() {
    let project = setup_project();
    fs::write(project.path().join("secret.txt"), "secret").unwrap();
    let addr = start_server(&project);

    let response = get(addr, "/website/../secret.txt");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
}
