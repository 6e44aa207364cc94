use assert_cmd::Command;
use predicates::prelude::*;

/// One sandboxed pledger environment per test: config and data both live in
/// a temp dir via PLEDGER_CONFIG_DIR, so nothing touches the real home.
struct Env {
    _dir: tempfile::TempDir,
    config_dir: std::path::PathBuf,
    data_dir: std::path::PathBuf,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&config_dir).unwrap();
        let env = Self { _dir: dir, config_dir, data_dir };
        env.cmd()
            .args(["init", "--data-dir"])
            .arg(&env.data_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized pledger"));
        env
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pledger").unwrap();
        cmd.env("PLEDGER_CONFIG_DIR", &self.config_dir);
        cmd
    }

    /// Persist a session the way `login` does, without the password prompt.
    fn set_session(&self, email: &str) {
        let settings = serde_json::json!({
            "data_dir": self.data_dir.to_string_lossy(),
            "session_email": email,
        });
        std::fs::write(
            self.config_dir.join("settings.json"),
            format!("{}\n", serde_json::to_string_pretty(&settings).unwrap()),
        )
        .unwrap();
    }

    fn add(&self, date: &str, shop: &str, kind: &str, amount: &str, note: &str) {
        self.cmd()
            .args([
                "add", "--date", date, "--shop", shop, "--type", kind, "--amount", amount,
                "--note", note,
            ])
            .assert()
            .success();
    }
}

#[test]
fn test_add_then_summary() {
    let env = Env::new();
    env.add("2024-01-01", "Acme", "credit", "500", "Invoice #123");
    env.add("2024-01-05", "Acme", "debit", "200", "part payment");
    env.add("2024-01-03", "Bolt Supplies", "credit", "120.50", "");

    env.cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("300.00"))
        .stdout(predicate::str::contains("Bolt Supplies"))
        .stdout(predicate::str::contains("Total Payable to Suppliers"))
        .stdout(predicate::str::contains("420.50"));
}

#[test]
fn test_summary_on_empty_ledger() {
    let env = Env::new();
    env.cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger is empty"));
}

#[test]
fn test_shops_first_appearance_order() {
    let env = Env::new();
    env.add("2024-02-01", "Bolt", "credit", "10", "");
    env.add("2024-01-01", "Acme", "credit", "10", "");
    env.add("2024-03-01", "Bolt", "debit", "5", "");

    let output = env.cmd().arg("shops").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let shops: Vec<&str> = stdout.lines().collect();
    assert_eq!(shops, ["Bolt", "Acme"]);
}

#[test]
fn test_statement_running_balance() {
    let env = Env::new();
    // Inserted out of date order; the statement sorts by date.
    env.add("2024-01-05", "Acme", "debit", "200", "");
    env.add("2024-01-01", "Acme", "credit", "500", "");

    env.cmd()
        .args(["statement", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500.00"))
        .stdout(predicate::str::contains("300.00"))
        .stdout(predicate::str::contains("Balance due"));
}

#[test]
fn test_statement_unknown_shop_fails() {
    let env = Env::new();
    env.add("2024-01-01", "Acme", "credit", "500", "");
    env.cmd()
        .args(["statement", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no transactions"));
}

#[test]
fn test_add_rejects_zero_amount_and_appends_nothing() {
    let env = Env::new();
    env.cmd()
        .args(["add", "--shop", "Acme", "--type", "credit", "--amount", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    let ledger = std::fs::read_to_string(env.data_dir.join("ledger_data.csv"))
        .unwrap_or_else(|_| "Date,Shop Name,Type,Amount,Description".to_string());
    assert_eq!(ledger.lines().count(), 1, "only the header should be present");
}

#[test]
fn test_add_rejects_missing_shop_name() {
    let env = Env::new();
    env.cmd()
        .args(["add", "--shop", "  ", "--type", "credit", "--amount", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shop name is required"));
}

#[test]
fn test_ledger_file_format() {
    let env = Env::new();
    env.add("2024-01-01", "Acme", "credit", "500", "Invoice #123");
    let content = std::fs::read_to_string(env.data_dir.join("ledger_data.csv")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Date,Shop Name,Type,Amount,Description"));
    assert_eq!(
        lines.next(),
        Some("2024-01-01,Acme,Credit (Purchase),500,Invoice #123")
    );
}

#[cfg(feature = "pdf")]
#[test]
fn test_export_writes_pdf() {
    let env = Env::new();
    env.add("2024-01-01", "Acme", "credit", "500", "Invoice #123");
    let out = env.data_dir.join("acme.pdf");
    env.cmd()
        .args(["export", "Acme", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote "));
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_backup_copies_raw_bytes() {
    let env = Env::new();
    env.add("2024-01-01", "Acme", "credit", "500", "");
    let out = env.data_dir.join("backup.csv");
    env.cmd()
        .args(["backup", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved to"));
    let original = std::fs::read(env.data_dir.join("ledger_data.csv")).unwrap();
    let copied = std::fs::read(&out).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn test_status_reports_counts() {
    let env = Env::new();
    env.add("2024-01-01", "Acme", "credit", "500", "");
    env.add("2024-01-02", "Bolt", "credit", "100", "");
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  2"))
        .stdout(predicate::str::contains("Shops:         2"))
        .stdout(predicate::str::contains("Total payable: 600.00"));
}

#[test]
fn test_session_routes_to_per_user_ledger() {
    let env = Env::new();
    // Set the session the way a successful `login` persists it.
    env.set_session("a.user@shop.example");

    env.add("2024-01-01", "Acme", "credit", "500", "Invoice #123");

    let user_ledger = env.data_dir.join("a_user_shop_example_ledger.csv");
    let content = std::fs::read_to_string(&user_ledger).unwrap();
    assert!(content.contains("Acme"));
    assert!(
        !env.data_dir.join("ledger_data.csv").exists(),
        "shared ledger must stay untouched while a session is active"
    );

    env.cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("500.00"));
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.user@shop.example"))
        .stdout(predicate::str::contains("a_user_shop_example_ledger.csv"));
}

#[test]
fn test_logout_clears_session_back_to_shared_ledger() {
    let env = Env::new();
    env.set_session("a.user@shop.example");
    env.add("2024-01-01", "Acme", "credit", "500", "");

    env.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out a.user@shop.example"));

    // Back on the shared ledger, which is empty.
    env.cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger is empty"));
}

#[test]
fn test_status_on_fresh_install_suggests_add() {
    let env = Env::new();
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("pledger add"))
        .stdout(predicate::str::contains("No ledger yet"));
}

#[test]
fn test_logout_without_session() {
    let env = Env::new();
    env.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session"));
}
