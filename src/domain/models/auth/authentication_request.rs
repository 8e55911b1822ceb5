/// 인증 미들웨어 동작 모드
///
/// 역할 검사는 미들웨어가 아니라 핸들러(`AuthenticatedUser::ensure_admin`)에서 수행합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 토큰이 없으면 401로 거부
    Required,
    /// 토큰이 있으면 사용자 정보를 주입하고, 없어도 요청을 진행
    Optional,
}
