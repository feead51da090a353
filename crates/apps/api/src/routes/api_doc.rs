use crate::routes::{auth, files, jobs, root};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::sign_up,
        auth::handlers::sign_in,
        auth::handlers::refresh_session,
        auth::handlers::sign_out,
        // File handlers
        files::handlers::upload_fcs_files,
        files::handlers::get_my_files,
        files::handlers::get_file,
        files::handlers::generate_download_url,
        // Job handlers
        jobs::handlers::create_stat_job,
        jobs::handlers::get_stat_jobs,
        jobs::handlers::get_stat_job,
        jobs::handlers::create_info_job,
        jobs::handlers::get_info_jobs,
        jobs::handlers::get_info_job,
    ),
    components(
        schemas(
            common_services::api::auth::interfaces::SignUpPayload,
            common_services::api::auth::interfaces::SignInForm,
            common_services::api::auth::interfaces::Token,
            common_services::api::files::interfaces::UploadFileSetting,
            common_services::api::files::interfaces::FailedFile,
            common_services::api::files::interfaces::UploadBatchResult,
            common_services::api::jobs::interfaces::JobRead,
            common_services::api::jobs::interfaces::JobResult,
            common_services::api::jobs::interfaces::FilesStatResult,
            common_services::api::jobs::interfaces::FcsInfoResult,
            common_services::database::tables::fcs_file::FcsFileSummary,
            common_services::database::tables::job::JobType,
            common_services::database::tables::job::JobStatus,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Files", description = "FCS file upload and retrieval"),
        (name = "Jobs", description = "Asynchronous analysis jobs"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
