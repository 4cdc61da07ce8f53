use super::*;

#[test]
fn renders_when_token_present() {
    let tokens = TokenStore::in_memory();
    tokens.set("T1");
    assert_eq!(guard(&tokens), RouteDecision::Render);
}

#[test]
fn redirects_to_login_when_absent() {
    let tokens = TokenStore::in_memory();
    assert_eq!(guard(&tokens), RouteDecision::Redirect(LOGIN_PATH));
}

#[test]
fn logout_flips_decision_immediately() {
    let tokens = TokenStore::in_memory();
    tokens.set("T1");
    tokens.clear();
    assert_eq!(guard(&tokens), RouteDecision::Redirect("/auth/login"));
}

#[test]
fn auth_pages_are_public() {
    assert!(is_public_path("/"));
    assert!(is_public_path("/auth/login"));
    assert!(is_public_path("/auth/reset-password"));
    assert!(!is_public_path("/dashboard"));
    assert!(!is_public_path("/room/abc"));
}
