pub static API_URL: &str = "http://127.0.0.1:5000";
pub static SERVER_COMMAND: &str = "python -m cog.server.http";
