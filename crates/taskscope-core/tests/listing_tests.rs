mod common;

use common::{write_playbook, SITE};
use taskscope_core::{
    display::{render_json, TextReport},
    handle_list_tasks,
    params::{ListTasks, ListingOptions},
    ListingError,
};

fn params(path: std::path::PathBuf, options: ListingOptions) -> ListTasks {
    ListTasks {
        playbooks: vec![path],
        options,
        ..Default::default()
    }
}

fn list_tasks() -> ListingOptions {
    ListingOptions {
        list_tasks: true,
        ..Default::default()
    }
}

fn task_names(params: &ListTasks) -> Vec<Vec<String>> {
    let summaries = handle_list_tasks(params).expect("Failed to list playbook");
    summaries[0]
        .plays
        .iter()
        .map(|play| play.tasks.iter().map(|task| task.name.clone()).collect())
        .collect()
}

#[test]
fn test_lists_tasks_in_execution_order() {
    let (_dir, path) = write_playbook(SITE);
    let summaries = handle_list_tasks(&params(path.clone(), list_tasks())).unwrap();

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.playbook, path.to_string_lossy());
    assert_eq!(summary.plays.len(), 2);

    let web = &summary.plays[0];
    assert_eq!(web.name, "Web tier");
    assert_eq!(web.hosts, "webservers");
    assert_eq!(web.tags, vec!["web"]);
    let names: Vec<&str> = web.tasks.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, vec!["Announce", "Install nginx", "Render config", "service"]);

    assert_eq!(web.tasks[1].tags, vec!["packages", "web"]);
    assert_eq!(web.tasks[2].tags, vec!["config", "web"]);
    assert_eq!(
        web.tasks[3].tags,
        vec!["always", "config", "restart", "service", "web"]
    );
    assert_eq!(
        web.task_tags,
        vec!["always", "config", "packages", "restart", "service", "web"]
    );

    let db = &summary.plays[1];
    assert_eq!(db.name, "dbservers");
    assert_eq!(db.tasks.len(), 1);
    assert_eq!(db.tasks[0].name, "ping");
    assert!(db.tasks[0].tags.is_empty());
    assert!(db.task_tags.is_empty());
}

#[test]
fn test_task_tags_contain_play_tags_and_every_task_tag() {
    let (_dir, path) = write_playbook(SITE);
    let summaries = handle_list_tasks(&params(path, list_tasks())).unwrap();

    for play in &summaries[0].plays {
        for tag in &play.tags {
            assert!(play.task_tags.contains(tag));
        }
        for task in &play.tasks {
            for tag in &play.tags {
                assert!(task.tags.contains(tag), "{} lacks play tag {tag}", task.name);
            }
            for tag in &task.tags {
                assert!(play.task_tags.contains(tag));
            }
        }
        let mut sorted = play.task_tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, play.task_tags);
    }
}

#[test]
fn test_tag_selection() {
    let (_dir, path) = write_playbook(SITE);

    let mut selected = params(path.clone(), list_tasks());
    selected.tags = vec!["packages".to_string()];
    assert_eq!(
        task_names(&selected),
        vec![vec!["Install nginx".to_string(), "service".to_string()], vec![]]
    );

    let mut never = params(path.clone(), list_tasks());
    never.tags = vec!["never,announce".to_string()];
    assert_eq!(
        task_names(&never),
        vec![
            vec!["service".to_string(), "Skipped by default".to_string()],
            vec![]
        ]
    );

    let mut skipped = params(path, list_tasks());
    skipped.skip_tags = vec!["config".to_string()];
    assert_eq!(
        task_names(&skipped),
        vec![
            vec!["Announce".to_string(), "Install nginx".to_string()],
            vec!["ping".to_string()]
        ]
    );
}

#[test]
fn test_untagged_selection() {
    let (_dir, path) = write_playbook(SITE);
    let mut untagged = params(path, list_tasks());
    untagged.tags = vec!["untagged".to_string()];

    assert_eq!(
        task_names(&untagged),
        vec![vec!["service".to_string()], vec!["ping".to_string()]]
    );
}

#[test]
fn test_paths_are_reported_on_request() {
    let (_dir, path) = write_playbook(SITE);
    let origin = std::fs::canonicalize(&path).unwrap();
    let origin = origin.to_string_lossy();

    let options = ListingOptions {
        list_tasks_with_path: true,
        ..Default::default()
    };
    let summaries = handle_list_tasks(&params(path.clone(), options)).unwrap();
    let web = &summaries[0].plays[0];
    assert_eq!(web.path, Some(format!("{origin}:1")));

    let paths: Vec<String> = web.tasks.iter().filter_map(|t| t.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            format!("{origin}:5"),
            format!("{origin}:8"),
            format!("{origin}:12"),
            format!("{origin}:15"),
        ]
    );
    assert_eq!(
        summaries[0].plays[1].tasks[0].path,
        Some(format!("{origin}:26"))
    );

    let summaries = handle_list_tasks(&params(path, list_tasks())).unwrap();
    assert!(summaries[0].plays[0].path.is_none());
    assert!(summaries[0].plays[0].tasks.iter().all(|t| t.path.is_none()));
}

#[test]
fn test_text_report_for_playbook() {
    let (_dir, path) = write_playbook(SITE);
    let options = ListingOptions {
        list_tasks: true,
        list_tags: true,
        ..Default::default()
    };
    let summaries = handle_list_tasks(&params(path.clone(), options)).unwrap();
    let output = TextReport::new(&summaries[0], &options).to_string();

    let expected = format!(
        "\nplaybook: {}\n\
\n  play #1 (webservers): Web tier\tTAGS: [web]\
\n    tasks:\
\n      Announce\tTAGS: [web]\
\n      Install nginx\tTAGS: [packages, web]\
\n      Render config\tTAGS: [config, web]\
\n      service\tTAGS: [always, config, restart, service, web]\
\n      TASK TAGS: [always, config, packages, restart, service, web]\
\n\
\n  play #2 (dbservers): dbservers\tTAGS: []\
\n    tasks:\
\n      ping\tTAGS: []\
\n      TASK TAGS: []\
\n\n",
        path.display()
    );
    assert_eq!(output, expected);
}

#[test]
fn test_json_document_for_playbook() {
    let (_dir, path) = write_playbook(SITE);
    let options = ListingOptions {
        list_tasks_json: true,
        ..Default::default()
    };
    let summaries = handle_list_tasks(&params(path.clone(), options)).unwrap();
    let rendered = render_json(&summaries[0]).unwrap();
    let document: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(document["playbook"], path.to_str().unwrap());
    let directory = std::fs::canonicalize(path.parent().unwrap()).unwrap();
    assert_eq!(document["playbook_dir"], directory.to_str().unwrap());

    let plays = document["plays"].as_array().unwrap();
    assert_eq!(plays.len(), 2);
    assert_eq!(plays[1]["name"], "dbservers");
    assert_eq!(plays[1]["hosts"], "dbservers");
    assert_eq!(plays[1]["tags"], serde_json::json!([]));
    assert_eq!(
        plays[1]["tasks"],
        serde_json::json!([{"name": "ping", "tags": []}])
    );
    assert!(!rendered.contains("\"path\""));
    assert!(!rendered.contains("null"));
}

#[test]
fn test_list_hosts_resolves_inventory() {
    let (_dir, path) =
        write_playbook("- hosts: all\n  tasks: [{ping: }]\n- hosts: db*,localhost\n  tasks: []\n");
    let options = ListingOptions {
        list_hosts: true,
        ..Default::default()
    };
    let mut request = params(path, options);
    request.inventory = Some("web1,db1,db2".to_string());

    let summaries = handle_list_tasks(&request).unwrap();
    let plays = &summaries[0].plays;
    assert_eq!(
        plays[0].host_names,
        Some(vec!["web1".to_string(), "db1".to_string(), "db2".to_string()])
    );
    assert_eq!(
        plays[1].host_names,
        Some(vec![
            "db1".to_string(),
            "db2".to_string(),
            "localhost".to_string()
        ])
    );

    request.limit = Some("db1".to_string());
    let summaries = handle_list_tasks(&request).unwrap();
    assert_eq!(
        summaries[0].plays[0].host_names,
        Some(vec!["db1".to_string()])
    );

    let output = TextReport::new(&summaries[0], &options).to_string();
    assert!(output.contains("    pattern: all\n    hosts (1):\n      db1\n"));
    assert!(!output.contains("tasks:"));
}

#[test]
fn test_all_playbooks_validated_before_loading() {
    let (_dir, path) = write_playbook(SITE);
    let request = ListTasks {
        playbooks: vec![path, "does-not-exist.yml".into()],
        ..Default::default()
    };

    let err = handle_list_tasks(&request).unwrap_err();
    assert!(matches!(err, ListingError::PlaybookNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "the playbook: does-not-exist.yml could not be found"
    );
}

#[test]
fn test_invalid_playbook_is_a_parse_error() {
    let (_dir, path) = write_playbook("- hosts: all\n  tasks:\n    - name: no action\n");
    let err = handle_list_tasks(&params(path, list_tasks())).unwrap_err();
    assert!(matches!(err, ListingError::Parse { .. }));
    assert!(err.to_string().contains("no action detected in task 'no action'"));
}

#[test]
fn test_default_mode_lists_tasks() {
    let (_dir, path) = write_playbook(SITE);
    let summaries = handle_list_tasks(&params(path, ListingOptions::default())).unwrap();
    assert_eq!(summaries[0].task_count(), 5);
}

#[cfg(unix)]
#[test]
fn test_symlinked_playbook_directory() {
    let (_target_dir, target) = write_playbook(SITE);
    let link_dir = tempfile::TempDir::new().unwrap();
    let link = link_dir.path().join("site.yml");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let options = ListingOptions {
        list_tasks_with_path: true,
        ..Default::default()
    };
    let summaries = handle_list_tasks(&params(link.clone(), options)).unwrap();
    let summary = &summaries[0];

    let link_dir = std::fs::canonicalize(link_dir.path()).unwrap();
    assert_eq!(summary.playbook, link.to_string_lossy());
    assert_eq!(summary.playbook_dir, link_dir.to_string_lossy());

    // Source locations still name the file that was read.
    let origin = std::fs::canonicalize(&target).unwrap();
    assert_eq!(
        summary.plays[0].tasks[0].path,
        Some(format!("{}:5", origin.display()))
    );
}
