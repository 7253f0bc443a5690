use std::path::PathBuf;

use tempfile::TempDir;

/// Helper function to write a playbook into a fresh temp directory
pub fn write_playbook(source: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("site.yml");
    std::fs::write(&path, source).expect("Failed to write playbook");
    (temp_dir, path)
}

/// A playbook exercising nested blocks, inherited tags and every section
pub const SITE: &str = "\
- hosts: webservers
  name: Web tier
  tags: [web]
  pre_tasks:
    - name: Announce
      debug: msg=start
  tasks:
    - name: Install nginx
      apt: name=nginx
      tags: packages
    - block:
        - name: Render config
          template: src=nginx.conf.j2 dest=/etc/nginx/nginx.conf
        - block:
            - service: name=nginx state=restarted
              tags: [restart, always]
          tags: service
      tags: config
    - meta: flush_handlers
  post_tasks:
    - name: Skipped by default
      debug: msg=never
      tags: never
- hosts: dbservers
  tasks:
    - ping:
";
