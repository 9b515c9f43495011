//! Property tests for `DisplaySession` against the headless driver

use homelog_display::{DisplaySession, HeadlessDriver, PanelGeometry};
use proptest::prelude::*;

fn panel() -> HeadlessDriver {
    HeadlessDriver::new(PanelGeometry::SSD1306_128X64)
}

fn cleared_panel() -> HeadlessDriver {
    let mut driver = panel();
    let mut session = DisplaySession::new(&mut driver);
    session.begin();
    session.clear();
    driver
}

proptest! {
    #[test]
    fn print_then_clear_matches_fresh_clear(text in "[ -~\n]{0,200}") {
        let mut driver = panel();
        {
            let mut session = DisplaySession::new(&mut driver);
            session.begin();
            session.print(&text);
            session.clear();
        }

        let fresh = cleared_panel();
        prop_assert_eq!(driver.screen(), fresh.screen());
        prop_assert!(driver.screen().cursor().is_home());
    }

    #[test]
    fn clear_twice_matches_clear_once(text in "[ -~\n]{0,200}") {
        let mut once = panel();
        let mut twice = panel();

        for (driver, clears) in [(&mut once, 1), (&mut twice, 2)] {
            let mut session = DisplaySession::new(driver);
            session.begin();
            session.print(&text);
            for _ in 0..clears {
                session.clear();
            }
        }

        prop_assert_eq!(once.screen(), twice.screen());
        prop_assert_eq!(once.buffer(), twice.buffer());
    }

    #[test]
    fn banner_always_four_lines(
        program in "[A-Za-z0-9]{1,21}",
        version in "[0-9.]{1,12}",
        build in "[a-z0-9]{1,21}",
    ) {
        let mut driver = panel();
        let mut session = DisplaySession::new(&mut driver);
        session.begin();
        session.banner(&program, &version, &build);

        let screen = session.driver().screen();
        let expected_version = format!("Version: {}", version);
        let (spacer, name, version_line, build_line) =
            (screen.line(0), screen.line(1), screen.line(2), screen.line(3));
        prop_assert_eq!(spacer.as_str(), "");
        prop_assert_eq!(name.as_str(), program.as_str());
        prop_assert_eq!(version_line.as_str(), expected_version.as_str());
        prop_assert_eq!(build_line.as_str(), build.as_str());
    }

    #[test]
    fn degraded_session_never_presents(text in "[ -~\n]{0,64}") {
        let mut driver = HeadlessDriver::failing(PanelGeometry::SSD1306_128X64);
        let mut session = DisplaySession::new(&mut driver);
        session.begin();
        session.print(&text);
        session.clear();
        session.banner("A", "1", "b");

        prop_assert_eq!(session.driver().present_count(), 0);
    }
}
