//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides the auth container and the guard's return location, then
//! mounts [`ScreensRoot`] inside the router. `ScreensRoot` is the root view:
//! it starts the one-time auth check, registers the `app.command` handler
//! and lays out the header, the guarded screens and the footer.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::components::{
    footer::Footer,
    header::Header,
    loading::Loading,
    protected::{GuardedScreens, ReturnTo},
};
use crate::config::APP;
use crate::state::auth::AuthState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(RwSignal::new(AuthState::default()));
    provide_context(ReturnTo(RwSignal::new(None)));

    view! {
        <Stylesheet id="leptos" href="/pkg/gistdesk.css"/>
        <Title text=APP.name/>

        <Router>
            <ScreensRoot/>
        </Router>
    }
}

/// Start the auth check and hook external commands up to navigation.
///
/// Runs on every mount. Re-registering the `app.command` handler replaces
/// the previous one and the command channel itself only starts once.
#[cfg(feature = "hydrate")]
fn mount_command_dispatcher(auth: RwSignal<AuthState>) {
    use std::rc::Rc;

    use leptos_router::NavigateOptions;
    use leptos_router::hooks::use_navigate;

    use crate::dispatch::{CommandDispatcher, LocalTasks};
    use crate::net::{api, command_client, rpc};
    use crate::state::auth::auth_dispatcher;
    use crate::state::auth_fetch::begin_auth_fetch;

    let navigate = use_navigate();
    let signal = begin_auth_fetch(
        &auth.get_untracked(),
        auth_dispatcher(auth),
        api::fetch_current_user,
        &LocalTasks,
    );
    let dispatcher =
        CommandDispatcher::new(signal, LocalTasks, move |path: &str| navigate(path, NavigateOptions::default()));

    let handler: rpc::Handler = Rc::new(move |data: &serde_json::Value| {
        dispatcher.handle_value(data);
    });
    rpc::register_handlers([(frames::APP_COMMAND, handler)]);
    command_client::spawn_command_client();
}

#[component]
fn ScreensRoot() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    // After hydration, so the server markup and the first client render agree.
    #[cfg(feature = "hydrate")]
    Effect::new(move || mount_command_dispatcher(auth));

    let busy = move || auth.with(AuthState::is_busy);

    view! {
        <div class="screens">
            {move || busy().then(|| view! { <Loading/> })}
            <Header/>
            <main class="screens__content">
                <Routes fallback=|| view! { <GuardedScreens/> }>
                    <Route path=StaticSegment("") view=GuardedScreens/>
                    <Route path=WildcardSegment("path") view=GuardedScreens/>
                </Routes>
            </main>
            <Footer/>
        </div>
    }
}
