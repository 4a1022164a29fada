/// Skip a test if the az CLI is not logged in or no test vault is configured.
#[macro_export]
macro_rules! skip_without_azure {
    () => {
        if std::process::Command::new("az")
            .args(["account", "show"])
            .output()
            .map(|o| !o.status.success())
            .unwrap_or(true)
        {
            eprintln!("SKIPPED: az not logged in");
            return;
        }
        if std::env::var("ENVLOAD_TEST_VAULT").is_err() {
            eprintln!("SKIPPED: ENVLOAD_TEST_VAULT not set (set to a Key Vault name)");
            return;
        }
    };
}
