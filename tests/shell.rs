//! FsShell against mock namenode and datanode servers

mod common;

use common::{config, MockServer, Reply};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use webhdfs::{FileSystem, FsShell, Permission};

/// Minimal in-memory namenode+datanode pair: CREATE/APPEND store bytes,
/// GETFILESTATUS/OPEN serve them back, DELETE removes them.
struct Cluster {
    nn: MockServer,
    dn: MockServer,
    files: Arc<Mutex<std::collections::HashMap<String, Vec<u8>>>>,
}

fn cluster() -> Cluster {
    let files = Arc::new(Mutex::new(std::collections::HashMap::<String, Vec<u8>>::new()));

    let store = files.clone();
    let dn = MockServer::start(move |r| {
        let path = r.path.trim_start_matches("/webhdfs/v1").to_string();
        let mut files = store.lock().unwrap();
        match r.op() {
            "CREATE" => {
                files.insert(path, r.body.clone());
                Reply::empty(201)
            }
            "APPEND" => {
                files.entry(path).or_default().extend_from_slice(&r.body);
                Reply::empty(200)
            }
            _ => match files.get(&path) {
                Some(data) => Reply::json(200, &String::from_utf8_lossy(data)),
                None => Reply::empty(404),
            },
        }
    });

    let store = files.clone();
    let dn_base = dn.url("");
    let nn = MockServer::start(move |r| {
        let path = r.path.trim_start_matches("/webhdfs/v1").to_string();
        let mut files = store.lock().unwrap();
        match r.op() {
            "CREATE" | "APPEND" | "OPEN" => {
                Reply::redirect(307, format!("{}{}?{}", dn_base, r.path, r.raw_query))
            }
            "GETFILESTATUS" => match files.get(&path) {
                Some(data) => Reply::json(
                    200,
                    &format!(
                        r#"{{"FileStatus":{{"length":{},"owner":"webuser","group":"supergroup","permission":"644","replication":3,"type":"FILE"}}}}"#,
                        data.len()
                    ),
                ),
                None => Reply::remote_exception(
                    404,
                    "FileNotFoundException",
                    &format!("File does not exist: {}", path),
                ),
            },
            "DELETE" => Reply::json(
                200,
                &format!(r#"{{"boolean":{}}}"#, files.remove(&path).is_some()),
            ),
            "SETPERMISSION" | "SETOWNER" => Reply::empty(200),
            _ => Reply::empty(400),
        }
    });

    Cluster { nn, dn, files }
}

fn shell(cluster: &Cluster) -> FsShell {
    let fs = FileSystem::new(config(&[cluster.nn.authority()])).unwrap();
    FsShell::new(fs, "/user/webuser")
}

#[test]
fn test_put_then_cat() {
    let cluster = cluster();
    let mut sh = shell(&cluster);
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("greeting.txt");
    std::fs::write(&local, "hello from local\n").unwrap();

    let remote = sh.put(&local, "docs", false).unwrap();
    assert_eq!(remote, "/user/webuser/docs/greeting.txt");
    assert_eq!(
        cluster.files.lock().unwrap().get(&remote).map(Vec::as_slice),
        Some(&b"hello from local\n"[..])
    );

    let mut out = Vec::new();
    sh.cat(&["docs/greeting.txt"], &mut out).unwrap();
    assert_eq!(out, b"hello from local\n");
}

#[test]
fn test_append_to_file_and_get() {
    let cluster = cluster();
    cluster
        .files
        .lock()
        .unwrap()
        .insert("/logs/app.log".to_string(), b"start\n".to_vec());
    let mut sh = shell(&cluster);

    let dir = TempDir::new().unwrap();
    let first = dir.path().join("1.log");
    let second = dir.path().join("2.log");
    std::fs::write(&first, "one\n").unwrap();
    std::fs::write(&second, "two\n").unwrap();

    sh.append_to_file(&[&first, &second], "/logs/app.log").unwrap();

    let copy = dir.path().join("app.log");
    let size = sh.get("/logs/app.log", &copy).unwrap();
    assert_eq!(size, 14);
    assert_eq!(std::fs::read_to_string(&copy).unwrap(), "start\none\ntwo\n");
}

#[test]
fn test_move_to_local_removes_remote() {
    let cluster = cluster();
    cluster
        .files
        .lock()
        .unwrap()
        .insert("/user/webuser/report.csv".to_string(), b"a,b\n1,2\n".to_vec());
    let mut sh = shell(&cluster);
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("report.csv");

    sh.move_to_local("report.csv", &local).unwrap();

    assert_eq!(std::fs::read(&local).unwrap(), b"a,b\n1,2\n");
    assert!(!sh.exists("report.csv").unwrap());
}

#[test]
fn test_exists() {
    let cluster = cluster();
    cluster
        .files
        .lock()
        .unwrap()
        .insert("/present".to_string(), Vec::new());
    let mut sh = shell(&cluster);

    assert!(sh.exists("/present").unwrap());
    assert!(!sh.exists("/absent").unwrap());
}

#[test]
fn test_chmod_chown_chgrp() {
    let cluster = cluster();
    let mut sh = shell(&cluster);

    sh.chmod(&["a", "/b"], Permission::parse("640").unwrap()).unwrap();
    sh.chown(&["a"], "hdfs").unwrap();
    sh.chgrp(&["a"], "analytics").unwrap();

    let requests = cluster.nn.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].path, "/webhdfs/v1/user/webuser/a");
    assert_eq!(requests[1].path, "/webhdfs/v1/b");
    assert_eq!(requests[1].query.get("permission").map(String::as_str), Some("640"));
    assert_eq!(requests[2].query.get("owner").map(String::as_str), Some("hdfs"));
    assert!(!requests[2].query.contains_key("group"));
    assert_eq!(requests[3].query.get("group").map(String::as_str), Some("analytics"));
    assert!(!requests[3].query.contains_key("owner"));
    assert_eq!(cluster.dn.hits(), 0);
}

#[test]
fn test_exists_on_active_standby_pair() {
    let active = MockServer::start(|_| {
        Reply::remote_exception(404, "FileNotFoundException", "File does not exist: /absent")
    });
    let standby = MockServer::start(|_| {
        Reply::remote_exception(
            403,
            "StandbyException",
            "Operation category READ is not supported in state standby",
        )
    });
    let fs = FileSystem::new(config(&[active.authority(), standby.authority()])).unwrap();
    let mut sh = FsShell::new(fs, "/user/webuser");

    assert!(!sh.exists("/absent").unwrap());
    assert_eq!(active.hits(), 1);
    assert_eq!(standby.hits(), 1);
}
