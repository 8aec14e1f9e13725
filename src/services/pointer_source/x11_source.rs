//! Источник событий курсора на X11.
//!
//! Подписывается на XInput2 raw motion для всех master устройств на
//! корневом окне, а мониторы получает через XRandR 1.5. Сокет соединения
//! регистрируется в tokio через [`AsyncFd`], поэтому ожидание событий не
//! блокирует поток.

use crate::error::{EdgesError, Result};
use crate::events::PointerSample;
use crate::services::geometry::Rectangle;
use std::ffi::CString;
use std::mem::MaybeUninit;
use std::os::raw::{c_int, c_uint};
use std::os::unix::io::RawFd;
use std::ptr;
use tokio::io::unix::AsyncFd;
use tracing::{debug, info};
use x11::{xinput2, xlib, xrandr};

use super::r#trait::PointerSourceTrait;

/// Владеет соединением с X сервером и закрывает его при Drop
struct DisplayHandle(*mut xlib::Display);

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        info!("Закрытие соединения с X сервером");
        // SAFETY: указатель получен от XOpenDisplay и больше нигде не закрывается
        unsafe { xlib::XCloseDisplay(self.0) };
    }
}

pub struct X11PointerSource {
    monitors: Vec<Rectangle>,
    fd: AsyncFd<RawFd>,
    xi_opcode: c_int,
    root: xlib::Window,
    // Объявлен последним: соединение закрывается после остальных полей
    display: DisplayHandle,
}

impl X11PointerSource {
    pub fn new() -> Result<Self> {
        info!("Инициализация X11PointerSource");

        // SAFETY: NULL означает подключение к дисплею из $DISPLAY
        let raw = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if raw.is_null() {
            return EdgesError::display("XOpenDisplay() failed");
        }
        let display = DisplayHandle(raw);

        // SAFETY: display валиден до конца жизни DisplayHandle
        let root = unsafe { xlib::XDefaultRootWindow(display.0) };

        let xi_opcode = Self::query_xinput(&display)?;
        Self::query_xrandr(&display)?;
        Self::select_raw_motion(&display, root);
        let monitors = Self::get_monitors(&display, root)?;

        for (i, monitor) in monitors.iter().enumerate() {
            info!(
                "Монитор {}: {}x{}+{}+{}",
                i, monitor.width, monitor.height, monitor.x, monitor.y
            );
        }

        // SAFETY: display валиден
        let fd = unsafe { xlib::XConnectionNumber(display.0) };
        let fd = AsyncFd::new(fd)?;

        Ok(Self {
            monitors,
            fd,
            xi_opcode,
            root,
            display,
        })
    }

    fn query_xinput(display: &DisplayHandle) -> Result<c_int> {
        let name = CString::new("XInputExtension")
            .map_err(|e| EdgesError::Internal(e.to_string()))?;
        let mut opcode: c_int = 0;
        let mut event: c_int = 0;
        let mut error: c_int = 0;

        // SAFETY: все указатели ссылаются на живые локальные переменные
        let present = unsafe {
            xlib::XQueryExtension(display.0, name.as_ptr(), &mut opcode, &mut event, &mut error)
        };
        if present == xlib::False {
            return EdgesError::display("XInput extension not available");
        }

        debug!("XInput opcode: {}", opcode);
        Ok(opcode)
    }

    fn query_xrandr(display: &DisplayHandle) -> Result<()> {
        let mut event_base: c_int = 0;
        let mut error_base: c_int = 0;
        let mut major: c_int = 0;
        let mut minor: c_int = 0;

        // SAFETY: все указатели ссылаются на живые локальные переменные
        let ok = unsafe {
            xrandr::XRRQueryExtension(display.0, &mut event_base, &mut error_base) != xlib::False
                && xrandr::XRRQueryVersion(display.0, &mut major, &mut minor) != 0
        };
        if !ok {
            return EdgesError::display("Xrandr extension not available");
        }
        if !(major > 1 || (major == 1 && minor >= 5)) {
            return EdgesError::display(format!("Xrandr version {}.{} < 1.5", major, minor));
        }

        debug!("XRandR версии {}.{}", major, minor);
        Ok(())
    }

    fn select_raw_motion(display: &DisplayHandle, root: xlib::Window) {
        let mut mask = [0u8; (xinput2::XI_LASTEVENT as usize + 7) / 8];

        // SAFETY: маска живёт до конца вызова, Xlib копирует её в запрос
        unsafe {
            xinput2::XISetMask(&mut mask, xinput2::XI_RawMotion);

            let mut event_mask = xinput2::XIEventMask {
                deviceid: xinput2::XIAllMasterDevices,
                mask_len: mask.len() as c_int,
                mask: mask.as_mut_ptr(),
            };
            xinput2::XISelectEvents(display.0, root, &mut event_mask, 1);
            xlib::XFlush(display.0);
        }
    }

    fn get_monitors(display: &DisplayHandle, root: xlib::Window) -> Result<Vec<Rectangle>> {
        let mut count: c_int = 0;

        // SAFETY: результат освобождается через XRRFreeMonitors ниже
        let info = unsafe { xrandr::XRRGetMonitors(display.0, root, xlib::True, &mut count) };
        if info.is_null() {
            return EdgesError::display("Failed to get monitors");
        }

        let monitors = (0..count.max(0) as usize)
            .map(|i| {
                // SAFETY: i < count, массив из count элементов
                let m = unsafe { &*info.add(i) };
                Rectangle::new(m.x, m.y, m.width, m.height)
            })
            .collect::<Vec<_>>();

        // SAFETY: info получен от XRRGetMonitors и больше не используется
        unsafe { xrandr::XRRFreeMonitors(info) };

        if monitors.is_empty() {
            return EdgesError::display("XRandR не сообщил ни одного активного монитора");
        }
        Ok(monitors)
    }

    /// Забрать из очереди Xlib следующее событие; true, если это raw motion
    fn next_event_is_motion(&self) -> bool {
        let mut event = MaybeUninit::<xlib::XEvent>::uninit();

        // SAFETY: вызывается только когда XPending > 0, XNextEvent заполняет event
        unsafe {
            xlib::XNextEvent(self.display.0, event.as_mut_ptr());
            let event = event.assume_init();
            let mut cookie: xlib::XGenericEventCookie = event.generic_event_cookie;
            let has_data = xlib::XGetEventData(self.display.0, &mut cookie) != xlib::False;

            let is_motion = cookie.type_ == xlib::GenericEvent
                && cookie.extension == self.xi_opcode
                && cookie.evtype == xinput2::XI_RawMotion;

            if has_data {
                xlib::XFreeEventData(self.display.0, &mut cookie);
            }
            is_motion
        }
    }
}

#[async_trait::async_trait(?Send)]
impl PointerSourceTrait for X11PointerSource {
    async fn next_sample(&mut self) -> Result<Option<PointerSample>> {
        loop {
            // Сначала разбираем то, что Xlib уже прочитал из сокета
            // SAFETY: display валиден
            while unsafe { xlib::XPending(self.display.0) } > 0 {
                if self.next_event_is_motion() {
                    return self.query_pointer().map(Some);
                }
            }

            let mut guard = self.fd.readable().await?;
            guard.clear_ready();
        }
    }

    fn query_pointer(&self) -> Result<PointerSample> {
        let mut root_ret: xlib::Window = 0;
        let mut child_ret: xlib::Window = 0;
        let mut x: c_int = 0;
        let mut y: c_int = 0;
        let mut win_x: c_int = 0;
        let mut win_y: c_int = 0;
        let mut mask: c_uint = 0;

        // SAFETY: все указатели ссылаются на живые локальные переменные
        let same_screen = unsafe {
            xlib::XQueryPointer(
                self.display.0,
                self.root,
                &mut root_ret,
                &mut child_ret,
                &mut x,
                &mut y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        if same_screen == xlib::False {
            debug!("Курсор находится на другом экране X");
        }

        Ok(PointerSample::new(x, y))
    }

    fn display_size(&self) -> (i32, i32) {
        // SAFETY: display валиден
        unsafe {
            let screen = xlib::XDefaultScreen(self.display.0);
            (
                xlib::XDisplayWidth(self.display.0, screen),
                xlib::XDisplayHeight(self.display.0, screen),
            )
        }
    }

    fn monitors(&self) -> &[Rectangle] {
        &self.monitors
    }
}

impl Drop for X11PointerSource {
    fn drop(&mut self) {
        debug!("Освобождение X11PointerSource ({} мониторов)", self.monitors.len());
    }
}
