use super::*;

#[test]
fn room_paths_embed_id() {
    let id = "3f1c".to_owned();
    assert_eq!(Endpoint::RoomDetail(id.clone()).path(), "/room/3f1c/");
    assert_eq!(Endpoint::LeaveRoom(id.clone()).path(), "/room/3f1c/leave/");
    assert_eq!(Endpoint::DeleteRoom(id.clone()).path(), "/room/3f1c/delete/");
    assert_eq!(Endpoint::RemoveMember(id).path(), "/room/3f1c/remove-member/");
}

#[test]
fn methods_match_backend_routes() {
    assert_eq!(Endpoint::VerifySession.method(), Method::Get);
    assert_eq!(Endpoint::DeleteRoom("x".to_owned()).method(), Method::Delete);
    assert_eq!(Endpoint::UpdatePhone.method(), Method::Put);
    assert_eq!(Endpoint::StkPush.method(), Method::Post);
    assert_eq!(Endpoint::LeaveRoom("x".to_owned()).method(), Method::Post);
}

#[test]
fn services_route_to_owning_backend() {
    assert_eq!(Endpoint::Login.service(), Service::Auth);
    assert_eq!(Endpoint::ListRooms.service(), Service::Rooms);
    assert_eq!(Endpoint::StkPush.service(), Service::Payments);
    assert_eq!(Endpoint::Transactions.service(), Service::Payments);
}

#[test]
fn only_pre_login_endpoints_are_public() {
    for public in [
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::SendResetOtp,
        Endpoint::VerifyResetOtp,
        Endpoint::ResetPassword,
    ] {
        assert!(!public.requires_auth(), "{public:?}");
    }
    for protected in [
        Endpoint::VerifySession,
        Endpoint::ListRooms,
        Endpoint::StkPush,
        Endpoint::UpdatePassword,
    ] {
        assert!(protected.requires_auth(), "{protected:?}");
    }
}
