/// Static help text printed by `?`.
pub const HELP_TEXT: &str = r#"
Requests:
  g(path)              GET
  p(path body)         POST
  pu(path body)        PUT
  pa(path body)        PATCH
  d(path)              DELETE

  body is one of:
    {key:value,...}    JSON object (values are sent as strings)
    ?key=value&...     URL-encoded form
    "text"             plain text

  <name:value>         header for this request only, anywhere inside ( )
  ${name}              insert a variable into a path, body or header

Variables:
  name = value         bind a literal
  name =               unbind
  name = $.path        bind one field of the last response
  {a, b:c} = $         bind a and c from fields a and b of the last response
  {a} = g(path)        send a request, then bind from its response
  $$auth = token       send "Authorization: Bearer token" on every request

Session:
  $                    show last response
  ?v / ?vc             list / clear variables
  ?h / ?hc             list / clear session headers
  ?h name: value       set a session header
  ?h name              unset a session header
  ?d                   toggle request echo
  ?                    show this help
  exit, quit, q, x     leave rapid

Examples:
  g(users/1)
  token = $.token
  p(/users {name:Bob,age:30} <x-trace:1>)
"#;
