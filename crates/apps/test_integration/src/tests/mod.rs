use crate::test_context::TestContext;
use color_eyre::Result;
use tracing::info;

pub mod helpers;
mod test_auth;
mod test_files;
mod test_jobs;
mod test_root;

macro_rules! run_test {
    ($ctx:expr, $test_fn:path) => {
        info!("--- Running: {} ---", stringify!($test_fn));
        $test_fn($ctx).await?;
        info!("--- Passed:  {} ---", stringify!($test_fn));
    };
}

pub async fn run_all(ctx: &TestContext) -> Result<()> {
    // -- Root --
    run_test!(ctx, test_root::test_health_endpoint);
    // -- Auth --
    run_test!(ctx, test_auth::test_sign_up_conflict);
    run_test!(ctx, test_auth::test_sign_in_and_bearer_access);
    run_test!(ctx, test_auth::test_refresh_rotation);
    run_test!(ctx, test_auth::test_sign_out);
    // -- Files --
    run_test!(ctx, test_files::test_upload_rejects_wrong_extension);
    run_test!(ctx, test_files::test_upload_requires_settings_when_authenticated);
    run_test!(ctx, test_files::test_public_file_round_trip);
    run_test!(ctx, test_files::test_private_file_visibility);
    run_test!(ctx, test_files::test_anonymous_upload_is_public);
    // -- Jobs --
    run_test!(ctx, test_jobs::test_stat_job_zero_files);
    run_test!(ctx, test_jobs::test_stat_job_idempotence);
    run_test!(ctx, test_jobs::test_job_ownership_isolation);
    run_test!(ctx, test_jobs::test_fcs_info_job);
    run_test!(ctx, test_jobs::test_fcs_info_job_rejects_foreign_file);

    info!("All integration tests passed.");
    Ok(())
}
