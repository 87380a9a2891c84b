//! Canned demo check-ins
//!
//! Seven days of gratitude / prayer / scripture / obstacle notes. The texts
//! are written so that every extraction rule fires somewhere in the week.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use faithloop_domain::{Mood, NewEntry, RequestContext, DEMO_TAG};
use serde_json::json;

/// Number of canned items (and the most days a seed can cover)
pub const DEMO_DAYS: usize = 7;

/// Bumped whenever the canned table changes shape
pub const SEED_VERSION: u32 = 2;

/// Descriptive tags attached after the sentinel
pub const DEMO_TAGS: [&str; 4] = ["감사", "기도", "말씀", "demo"];

const MOODS: [Mood; DEMO_DAYS] = [
    Mood::Good,
    Mood::Neutral,
    Mood::Great,
    Mood::Bad,
    Mood::Good,
    Mood::Neutral,
    Mood::Great,
];

const CONTENTS: [&str; DEMO_DAYS] = [
    "1) 오늘 감사:
- 새벽에 일어나 조용히 기도할 수 있었음
- 가족 모두 건강하게 하루를 시작함

2) 기도제목:
- 이번 주 발표를 위한 지혜
- 어머니의 회복

3) 말씀/적용:
\"두려워하지 말라 내가 너와 함께 함이라\" 이사야 41:10
→ 발표 준비를 미루지 않기

4) 방해요인:
- 휴대폰을 보다가 잠이 늦어짐
! 저녁 기도를 건너뜀",
    "1) 감사:
- 새벽기도회에 참석함
- 동료가 건넨 커피 한 잔

2) 기도:
- 부모님 건강
- 회사에서의 관계

3) 말씀묵상:
빌립보서 4:6-7 \"아무 것도 염려하지 말고\"
→ 걱정을 기도 목록으로 옮겨 적기

4) 방해요인:
문제: 점심 묵상 시간을 회의가 가져감",
    "1) 감사:
- 주일예배에서 받은 은혜
- 소그룹 나눔
- 맑은 날씨 속 산책 기도

2) 기도:
- #청년부 수련회 준비
- 선교지 소식

3) 말씀:
\"너희는 먼저 그의 나라와 그의 의를 구하라\" 마태복음 6:33
💡 인사이트: 일정표에 예배 시간을 먼저 적어 두자",
    "1) 감사:
- 맡은 #성경통독 진도를 따라잡음

2) 기도제목:
- 시험을 앞둔 조카
- 봉사팀의 화합

3) 말씀/적용:
시편 23편 \"내게 부족함이 없으리로다\"
→ 불평 대신 감사 세 가지 적기

4) 방해요인:
어려움: 영상 시청을 멈추기가 힘들었음
! 밤늦게까지 깨어 있음",
    "1) 감사:
- 말씀 묵상 사흘 연속
- 이웃과 나눈 따뜻한 대화

2) 기도:
- 겸손한 마음
- 가정의 평안

3) 말씀묵상:
잠언 3:5-6 \"너는 마음을 다하여 여호와를 신뢰하고\"
💡 배움: 계획보다 신뢰가 먼저다

4) 방해요인:
- 급한 업무로 저녁 기도가 짧았음",
    "1) 감사:
- 오랜 친구와의 식사
- #무료급식 봉사 기회

2) 기도:
- 아픈 성도들의 회복
- 인내심

3) 말씀/적용:
\"항상 기뻐하라 쉬지 말고 기도하라\" 데살로니가전서 5:16-17
→ 짧게라도 자주 기도하기

4) 방해요인:
실패: 뉴스를 보다가 마음이 흔들려 잠을 설침",
    "1) 감사:
- 한 주를 건강하게 보냄
- 소그룹의 따뜻한 교제
- 꾸준히 이어진 #성경통독

2) 기도제목:
- 다음 주 계획
- 가족의 건강

3) 말씀묵상:
로마서 8:28 \"모든 것이 합력하여 선을 이루느니라\"
💡 깨달음: 힘든 일도 결국 성장의 기회가 된다

4) 방해요인:
! 새벽기도를 두 번 빠짐
→ 취침 시간을 앞당기기로 결단",
];

/// Build the demo entries for a seed of `days` days, oldest first
///
/// `min(days, DEMO_DAYS)` items are produced. The last one falls on
/// `ctx.today()`, earlier ones one day apart before it.
pub fn build_demo_items(ctx: &RequestContext, days: usize) -> Vec<NewEntry> {
    let count = days.min(DEMO_DAYS);
    (0..count)
        .map(|i| {
            let offset = (count - 1 - i) as i64;
            NewEntry::new(CONTENTS[i], MOODS[i])
                .with_tags(std::iter::once(DEMO_TAG).chain(DEMO_TAGS))
                .with_metadata(json!({
                    "is_demo": true,
                    "seed_version": SEED_VERSION,
                    "day_index": i,
                    "energy": 5 + (i % 4),
                }))
                .with_created_at(item_timestamp(ctx, offset, i))
        })
        .collect()
}

/// Midnight of `today - offset`, shifted to `9 + (2i mod 9)` hours and
/// `13i mod 60` minutes
fn item_timestamp(ctx: &RequestContext, offset: i64, index: usize) -> DateTime<Utc> {
    let hour = 9 + (index as i64 * 2) % 9;
    let minute = (index as i64 * 13) % 60;
    let day = ctx.today() - Duration::days(offset);
    day.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour) + Duration::minutes(minute)
}
