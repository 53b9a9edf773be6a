use crate::scanner::Scanner;

#[test]
fn extremes() {
    let mut s = Scanner::new("ab@".chars());
    assert_eq!(s.curr(), None);
    assert_eq!(s.next(), Some('a'));
    assert_eq!(s.peek(), Some('b'));
    assert_eq!(s.next(), Some('b'));
    assert_eq!(s.next(), Some('@'));
    assert_eq!(s.next(), None);
    assert_eq!(s.curr(), None);
}

#[test]
fn extract_tracks_offset() {
    let mut s = Scanner::new("just a test".chars());
    assert_eq!(s.offset(), 0);
    for _ in 0..4 { assert!(s.next().is_some()); }
    assert_eq!(s.extract().iter().collect::<String>(), "just");
    assert_eq!(s.offset(), 4);
    assert_eq!(s.peek(), Some(' '));
    s.next();
    s.ignore();
    assert_eq!(s.offset(), 5);
    assert_eq!(s.next(), Some('a'));
}

#[test]
fn accept_and_backtrack() {
    let mut s = Scanner::new("heey  you!".chars());
    assert_eq!(s.accept_any(&['h', 'e']), Some('h'));
    assert_eq!(s.accept(&'x'), None);
    assert_eq!(s.curr(), Some('h'));
    assert!(s.skip_all(&['e', 'y']));
    assert!(!s.skip_all(&['e', 'y']));
    assert_eq!(s.curr(), Some('y'));
    let backtrack = s.pos();
    assert!(s.skip_all(&[' ']));
    assert!(s.set_pos(backtrack));
    assert_eq!(s.peek(), Some(' '));
    assert!(!s.set_pos(100));
}

#[test]
fn ignore_past_end() {
    let mut s = Scanner::new("xy".chars());
    while s.next().is_some() {}
    s.ignore();
    assert_eq!(s.offset(), 2);
    assert_eq!(s.next(), None);
}
