//! Page scripts evaluated in the attached tab.
//!
//! Every script runs inside [`build`], which installs the handle registry on
//! `window.__chatNav` and binds the JSON arguments to `args`. Scripts resolve
//! to a [`crate::protocol::ScriptReply`] envelope.

use serde_json::Value;

/// Binding called by the injected mutation observer.
pub(crate) const MUTATION_BINDING: &str = "__chatNavMutation";

/// Class toggled on a message while it is highlighted.
pub(crate) const HIGHLIGHT_CLASS: &str = "chat-nav-highlight";

const PRELUDE: &str = r#"
const nav = window.__chatNav || (window.__chatNav = { next: 1, ids: new WeakMap(), nodes: new Map(), observers: [] });
const handleOf = (el) => {
  let id = nav.ids.get(el);
  if (id === undefined) {
    id = nav.next++;
    nav.ids.set(el, id);
    nav.nodes.set(id, new WeakRef(el));
  }
  return id;
};
const elementOf = (id) => {
  const ref = nav.nodes.get(id);
  const el = ref && ref.deref();
  return el && el.isConnected ? el : null;
};
"#;

/// Wrap `body` into a self-contained expression.
pub(crate) fn build(body: &str, args: &Value) -> String {
    format!("(() => {{{}const args = {};\n{}\n}})()", PRELUDE, args, body)
}

pub(crate) const CURRENT_URL: &str = "return { value: location.href };";

pub(crate) const QUERY_ALL: &str = r#"
try {
  return { value: Array.from(document.querySelectorAll(args.selector), handleOf) };
} catch (e) {
  return { error: 'selector', reason: String((e && e.message) || e) };
}"#;

pub(crate) const READ_CONTENT: &str = r#"
const el = elementOf(args.handle);
if (!el) return { detached: true };
const count = (selectors) => selectors.reduce((n, s) => {
  try { return n + el.querySelectorAll(s).length; } catch (e) { return n; }
}, 0);
const images = Array.from(el.querySelectorAll('img[src]'), (img) => ({
  src: img.src || '',
  width: img.width || img.naturalWidth || 0,
  height: img.height || img.naturalHeight || 0,
}));
return { value: {
  text: el.innerText || el.textContent || '',
  images,
  fileIndicators: count(args.fileSelectors),
  codeBlocks: count(args.codeSelectors),
} };"#;

pub(crate) const SCROLL_INTO_VIEW: &str = r#"
const el = elementOf(args.handle);
if (!el) return { detached: true };
el.scrollIntoView({ behavior: 'smooth', block: 'center', inline: 'nearest' });
return { value: null };"#;

pub(crate) const SET_HIGHLIGHT: &str = r#"
const el = elementOf(args.handle);
if (!el) return { detached: true };
if (!document.getElementById(args.className + '-style')) {
  const style = document.createElement('style');
  style.id = args.className + '-style';
  style.textContent = '.' + args.className + ' { outline: 3px solid #f5a623; outline-offset: 4px; transition: outline-color 0.3s; }';
  document.head.appendChild(style);
}
el.classList.toggle(args.className, args.on);
return { value: null };"#;

pub(crate) const SCROLL_TO_TOP: &str = r#"
window.scrollTo({ top: 0, behavior: 'smooth' });
return { value: null };"#;

pub(crate) const TAG: &str = r#"
const el = elementOf(args.handle);
if (!el) return { detached: true };
const existing = el.getAttribute(args.attr);
if (existing !== null) return { error: 'tagged', reason: existing };
el.setAttribute(args.attr, String(args.id));
return { value: null };"#;

pub(crate) const LOOKUP: &str = r#"
const el = document.querySelector('[' + args.attr + '="' + args.id + '"]');
return { value: el ? handleOf(el) : null };"#;

pub(crate) const IS_TAGGED: &str = r#"
const el = elementOf(args.handle);
if (!el) return { detached: true };
return { value: el.hasAttribute(args.attr) };"#;

pub(crate) const CLEAR_TAGS: &str = r#"
const tagged = new Set(document.querySelectorAll('[' + args.attr + ']'));
for (const [id, ref] of nav.nodes) {
  const el = ref.deref();
  if (!el) { nav.nodes.delete(id); continue; }
  if (el.hasAttribute(args.attr)) tagged.add(el);
}
tagged.forEach((el) => el.removeAttribute(args.attr));
return { value: tagged.size };"#;

pub(crate) const OBSERVE: &str = r#"
const el = elementOf(args.handle);
if (!el) return { detached: true };
const notify = window[args.binding];
const observer = new MutationObserver((records) => {
  let addedNodes = 0;
  let removedNodes = 0;
  for (const r of records) {
    addedNodes += r.addedNodes.length;
    removedNodes += r.removedNodes.length;
  }
  notify(JSON.stringify({ addedNodes, removedNodes }));
});
observer.observe(el, { childList: true, subtree: true });
nav.observers.push(observer);
return { value: nav.observers.length };"#;
