//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# ClientBrain Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Secrets come from the environment: SUPABASE_URL, SUPABASE_ANON_KEY,
# RESEND_API_KEY.

[globe]
# point_count = 220              # 4-5000
# idle_yaw_step = 0.004          # radians per frame
# yaw_sensitivity = 0.55
# pitch_sensitivity = 0.35
# radius_fraction = 0.37         # of the viewport size
# connection_distance = 0.55     # of the radius
# connection_depth_cutoff = -0.05
# point_depth_cutoff = -0.4
# line_opacity = 0.65
# line_width = 0.65
# dot_base_radius = 0.8
# dot_depth_radius = 2.2
# halo_multiplier = 4.0
# glow_opacity = 0.5
# core_base_opacity = 0.25
# core_depth_opacity = 0.75
# line_color = "#4F8EF7"
# glow_color = "#4F8EF7"
# core_color = "#A0D2FF"
# connection_strategy = "brute_force"   # brute_force, grid
# still_size = 520               # 64-2048

[server]
# host = "127.0.0.1"
# port = 3000

[auth]
# provider = "memory"            # memory, supabase
# url = "https://your-project.supabase.co"
# session_cookie = "cb-session"
# secure_cookie = false

[email]
# provider = "log"               # log, resend
# api_url = "https://api.resend.com/emails"
# from = "ClientBrain Waitlist <onboarding@resend.dev>"
# notify_address = "team@clientbrain.app"

[logging]
# level = "info"                 # trace, debug, info, warn, error
"##
    .to_string()
}
