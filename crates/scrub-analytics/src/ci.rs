//! CI environment detection.

/// Environment variables set by well-known CI systems.
pub const CI_ENV_VARS: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "BUILD_ID",
    "BUILD_NUMBER",
    "TEAMCITY_VERSION",
    "TRAVIS",
    "CIRCLECI",
    "JENKINS_URL",
    "HUDSON_URL",
    "bamboo.buildKey",
    "PHPCI",
    "GOCD_SERVER_HOST",
    "BUILDKITE",
    "TF_BUILD",
    "SYSTEM_TEAMFOUNDATIONSERVERURI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
];

/// Returns whether the process appears to run under CI.
pub fn is_ci_environment() -> bool {
    detect_with(|name| std::env::var_os(name).is_some())
}

/// CI detection against an arbitrary variable lookup.
pub fn detect_with<F>(is_set: F) -> bool
where
    F: Fn(&str) -> bool,
{
    CI_ENV_VARS.iter().any(|&name| is_set(name))
}
