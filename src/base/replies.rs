//! Reply texts the bot sends back to a channel.

use crate::base::types::ResultRecord;

/// Help text, sent whenever a mention is not a recommendation request.
pub const HELP_REPLY: &str = "저는 맛집 추천 봇 영자입니다. '지역명 맛집'을 찾아달라고 말해주세요!";

/// Sent when the search page could not be fetched or understood.
pub const UNAVAILABLE_REPLY: &str = "맛집 정보를 가져오지 못했어요. 잠시 후 다시 시도해주세요.";

/// Startup line when the transport connects.
pub const CONNECTED_STATUS: &str = "이영자봇 연결 및 실행 중!";

/// Startup line when the transport fails to connect.
pub const CONNECT_FAILED_STATUS: &str = "연결에 실패하였습니다. 에러를 확인해주세요.";

/// Recommendation text for a single record.
///
/// The detail URL is a plain concatenation of `detail_url` and the record ID.
pub fn recommendation_reply(record: &ResultRecord, detail_url: &str) -> String {
    format!("'{}'을(를) 추천합니다.\n자세히 보기:{}{}", record.name, detail_url, record.id)
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_reply() {
        let record = ResultRecord {
            id: "abc".to_string(),
            name: "Foo".to_string(),
        };

        let text = recommendation_reply(&record, "https://example.com/detail?id=");

        assert_eq!(text, "'Foo'을(를) 추천합니다.\n자세히 보기:https://example.com/detail?id=abc");
    }

    #[test]
    fn test_recommendation_reply_does_not_encode_id() {
        let record = ResultRecord {
            id: "a b&c".to_string(),
            name: "Bar".to_string(),
        };

        assert!(recommendation_reply(&record, "D/").ends_with("D/a b&c"));
    }
}
