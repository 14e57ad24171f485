use rusqlite::params;
use tempfile::{tempdir, TempDir};
use timewire_lib::{ActivityService, CommandError, Database, PathStyle, TrackerSettings};

fn open_service(path_style: PathStyle) -> (TempDir, ActivityService) {
    let dir = tempdir().unwrap();
    let db = Database::new(dir.path().join("test.sqlite3")).unwrap();
    let settings = TrackerSettings {
        path_style,
        heartbeat_merge_gap_secs: 0,
    };
    (dir, ActivityService::new(db, &settings))
}

async fn insert_process(db: &Database, path: Option<&str>, name: Option<&str>) -> i64 {
    let path = path.map(str::to_string);
    let name = name.map(str::to_string);
    db.execute(move |conn| {
        conn.execute(
            "INSERT INTO processes (path, name) VALUES (?1, ?2)",
            params![path, name],
        )?;
        Ok(conn.last_insert_rowid())
    })
    .await
    .unwrap()
}

async fn insert_window(db: &Database, process_id: i64, title: &str) -> i64 {
    db.save_window(process_id, title).await.unwrap().id
}

async fn insert_heartbeat(
    db: &Database,
    process_id: i64,
    window_id: i64,
    start: i64,
    end: i64,
    idle: bool,
) {
    db.execute(move |conn| {
        conn.execute(
            "INSERT INTO heartbeats (process_id, window_id, start_time, end_time, idle)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![process_id, window_id, start, end, idle],
        )?;
        Ok(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_process_time_ignores_idle() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();

    let pid = insert_process(&db, Some("/usr/bin/vim"), None).await;
    let wid = insert_window(&db, pid, "main.rs").await;
    insert_heartbeat(&db, pid, wid, 0, 10, false).await;
    insert_heartbeat(&db, pid, wid, 10, 25, false).await;
    insert_heartbeat(&db, pid, wid, 25, 1000, true).await;

    let data = service.get_processes_data().await.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].process_id, pid);
    assert_eq!(data[0].time, 25);
    assert_eq!(data[0].type_str, "unknown");
    assert_eq!(data[0].color.as_deref(), Some("#9e9e9e"));
}

#[tokio::test]
async fn test_process_list_filters_and_orders() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();

    let small = insert_process(&db, Some("/usr/bin/small"), None).await;
    let large = insert_process(&db, Some("/usr/bin/large"), None).await;
    let empty = insert_process(&db, Some(""), None).await;
    let null = insert_process(&db, None, None).await;
    let zero = insert_process(&db, Some("/usr/bin/zero"), None).await;
    let only_idle = insert_process(&db, Some("/usr/bin/idle"), None).await;

    for (pid, seconds, idle) in [
        (small, 5, false),
        (large, 50, false),
        (empty, 100, false),
        (null, 100, false),
        (zero, 0, false),
        (only_idle, 100, true),
    ] {
        let wid = insert_window(&db, pid, "w").await;
        insert_heartbeat(&db, pid, wid, 1_000, 1_000 + seconds, idle).await;
    }

    let data = service.get_processes_data().await.unwrap();
    let ids: Vec<i64> = data.iter().map(|row| row.process_id).collect();
    assert_eq!(ids, vec![large, small]);
    assert_eq!(data[0].time, 50);
    assert_eq!(data[1].time, 5);
}

#[tokio::test]
async fn test_process_names_are_derived_when_missing() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();

    let derived = insert_process(&db, Some("/usr/local/bin/foo"), None).await;
    let stored = insert_process(&db, Some("/opt/app/bin/app-bin"), Some("App")).await;
    let unmatched = insert_process(&db, Some("bare-name"), None).await;

    for (pid, seconds) in [(derived, 30), (stored, 20), (unmatched, 10)] {
        let wid = insert_window(&db, pid, "w").await;
        insert_heartbeat(&db, pid, wid, 0, seconds, false).await;
    }

    let data = service.get_processes_data().await.unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0].name.as_deref(), Some("foo"));
    assert_eq!(data[1].name.as_deref(), Some("App"));
    assert_eq!(data[2].path, "bare-name");
    assert_eq!(data[2].name, None);

    let json = serde_json::to_value(&data[2]).unwrap();
    assert!(json.get("name").is_none());
    assert_eq!(json["type"], "unknown");
}

#[tokio::test]
async fn test_windows_path_style() {
    let (_dir, service) = open_service(PathStyle::Windows);
    let db = service.database().clone();

    let pid = insert_process(&db, Some(r"C:\Windows\notepad.exe"), None).await;
    let wid = insert_window(&db, pid, "todo.txt").await;
    insert_heartbeat(&db, pid, wid, 0, 3, false).await;

    let data = service.get_processes_data().await.unwrap();
    assert_eq!(data[0].name.as_deref(), Some("notepad.exe"));
}

#[tokio::test]
async fn test_window_data_scoped_and_ordered() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();

    let pid = insert_process(&db, Some("/usr/bin/browser"), None).await;
    let other = insert_process(&db, Some("/usr/bin/other"), None).await;
    let docs = insert_window(&db, pid, "Docs").await;
    let news = insert_window(&db, pid, "News").await;
    let idle_only = insert_window(&db, pid, "Lock screen").await;
    let foreign = insert_window(&db, other, "Elsewhere").await;

    insert_heartbeat(&db, pid, docs, 0, 40, false).await;
    insert_heartbeat(&db, pid, news, 40, 50, false).await;
    insert_heartbeat(&db, pid, news, 50, 55, false).await;
    insert_heartbeat(&db, pid, idle_only, 55, 500, true).await;
    insert_heartbeat(&db, other, foreign, 0, 999, false).await;

    let data = service.get_windows_data(pid).await.unwrap();
    let rows: Vec<(&str, u64)> = data.iter().map(|w| (w.title.as_str(), w.time)).collect();
    assert_eq!(rows, vec![("Docs", 40), ("News", 15)]);
    assert_eq!(data[0].window_id, docs);
}

#[tokio::test]
async fn test_window_type_falls_back_to_process() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();

    let pid = insert_process(&db, Some("/usr/bin/browser"), None).await;
    let work = insert_window(&db, pid, "Issue tracker").await;
    let play = insert_window(&db, pid, "Video site").await;
    insert_heartbeat(&db, pid, work, 0, 20, false).await;
    insert_heartbeat(&db, pid, play, 20, 30, false).await;

    assert!(service.set_process_type(pid, "productive".into()).await.unwrap());
    assert!(service.set_window_type(play, "unproductive".into()).await.unwrap());

    let data = service.get_windows_data(pid).await.unwrap();
    assert_eq!(data[0].window_id, work);
    assert_eq!(data[0].type_str, "productive");
    assert_eq!(data[0].color.as_deref(), Some("#4caf50"));
    assert_eq!(data[1].window_id, play);
    assert_eq!(data[1].type_str, "unproductive");
    assert_eq!(data[1].color.as_deref(), Some("#f44336"));
}

#[tokio::test]
async fn test_set_process_type_is_reflected() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();

    let pid = insert_process(&db, Some("/usr/bin/game"), None).await;
    let wid = insert_window(&db, pid, "Level 1").await;
    insert_heartbeat(&db, pid, wid, 0, 60, false).await;

    assert!(service.set_process_type(pid, "unproductive".into()).await.unwrap());

    let data = service.get_processes_data().await.unwrap();
    assert_eq!(data[0].type_str, "unproductive");
    assert_eq!(data[0].color.as_deref(), Some("#f44336"));

    let process = db.find_process("/usr/bin/game").await.unwrap().unwrap();
    assert_eq!(process.type_str, "unproductive");
}

#[tokio::test]
async fn test_set_type_on_missing_ids() {
    let (_dir, service) = open_service(PathStyle::Posix);
    assert!(!service.set_process_type(4242, "neutral".into()).await.unwrap());
    assert!(!service.set_window_type(4242, "neutral".into()).await.unwrap());
}

#[tokio::test]
async fn test_set_unknown_type_is_rejected() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let db = service.database().clone();
    let pid = insert_process(&db, Some("/usr/bin/vim"), None).await;

    let err = service
        .set_process_type(pid, "legendary".into())
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::UnknownType(ref t) if t == "legendary"));

    let process = db.find_process("/usr/bin/vim").await.unwrap().unwrap();
    assert_eq!(process.type_str, "unknown");
}

#[tokio::test]
async fn test_type_data_lists_seeded_types() {
    let (_dir, service) = open_service(PathStyle::Posix);
    let types = service.get_type_data().await.unwrap();
    let labels: Vec<&str> = types.iter().map(|t| t.type_str.as_str()).collect();
    assert_eq!(labels, vec!["unknown", "productive", "neutral", "unproductive"]);
    assert!(types.iter().all(|t| t.color.starts_with('#')));
}
