//! Inline HTML views. Every interpolated value goes through [`escape`].

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn error_block(error: &str) -> String {
    if error.is_empty() {
        String::new()
    } else {
        format!("<p class=\"error\">{}</p>\n", escape(error))
    }
}

pub fn home() -> String {
    layout(
        "Home",
        "<h1>Welcome</h1>\n<p><a href=\"/login\">Log in</a> or <a href=\"/register\">register</a>.</p>",
    )
}

pub fn login(error: &str) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}<form method=\"post\" action=\"/login\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Log in</button>\n</form>\n\
         <p>No account? <a href=\"/register\">Register</a></p>",
        error_block(error)
    );
    layout("Log in", &body)
}

pub fn register(error: &str) -> String {
    let body = format!(
        "<h1>Register</h1>\n{}<form method=\"post\" action=\"/register\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Password <input type=\"password\" name=\"password\"></label>\n\
         <label>Confirm password <input type=\"password\" name=\"password_confirm\"></label>\n\
         <button type=\"submit\">Register</button>\n</form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a></p>",
        error_block(error)
    );
    layout("Register", &body)
}

pub fn private(username: &str) -> String {
    let body = format!(
        "<h1>Private area</h1>\n<p>Hello, {}.</p>\n<p><a href=\"/logout\">Log out</a></p>",
        escape(username)
    );
    layout("Private", &body)
}

pub fn not_found() -> String {
    layout(
        "Not found",
        "<h1>404</h1>\n<p>Page not found. <a href=\"/\">Home</a></p>",
    )
}

pub fn server_error() -> String {
    layout("Error", "<h1>500</h1>\n<p>Something went wrong.</p>")
}

/// Minimal HTML escaping for text and attribute contexts.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
