//! Page-side scripts evaluated over DevTools.
//!
//! Both scripts return JSON text so the result shape does not depend on how
//! the protocol serialises remote objects.

/// Lists every element that could act as a purchase control.
///
/// Produces an array of `{tag, role, text, disabled, visible}` matching
/// [`crate::domain::entities::ControlSnapshot`].
pub const ACTIONABLE_CONTROLS: &str = r#"
(() => {
  const selector = 'button, a, input[type="submit"], input[type="button"], [role="button"]';
  const controls = Array.from(document.querySelectorAll(selector)).map((el) => {
    const tag = el.tagName.toLowerCase();
    const style = window.getComputedStyle(el);
    const rect = el.getBoundingClientRect();
    const visible = style.display !== 'none'
      && style.visibility !== 'hidden'
      && (rect.width > 0 || rect.height > 0);
    const text = tag === 'input'
      ? (el.value || '')
      : (el.innerText || el.textContent || '');
    const ariaDisabled = (el.getAttribute('aria-disabled') || '').toLowerCase() === 'true';
    return {
      tag,
      role: el.getAttribute('role'),
      text,
      disabled: el.disabled === true || ariaDisabled,
      visible,
    };
  });
  return JSON.stringify(controls);
})()
"#;

/// Text of the first `h1`, or an empty string when there is none.
pub const PRIMARY_HEADING: &str = r#"
(() => {
  const heading = document.querySelector('h1');
  return heading ? (heading.innerText || heading.textContent || '') : '';
})()
"#;
